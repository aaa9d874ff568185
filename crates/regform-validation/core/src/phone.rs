//! Mobile number normalization and validation

use alloc::string::String;

/// Keeps only the ASCII digits of `raw`
///
/// Idempotent: `digits_only(&digits_only(s)) == digits_only(s)`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a normalized mobile number against `^[6-9]\d{9}$`
pub fn is_valid_mobile(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes.len() == 10
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}
