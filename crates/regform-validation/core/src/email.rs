//! Email shape validation

/// Validates the basic `local@domain.tld` shape
///
/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`:
/// - no whitespace anywhere
/// - exactly one '@' with content on both sides
/// - a '.' in the domain part that is neither its first nor last character
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("john@x.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        // The shape is permissive about what surrounds the dot
        assert!(is_valid_email("a@.b.c"));
        assert!(is_valid_email("weird!#$@host.x"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@exa\tmple.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
