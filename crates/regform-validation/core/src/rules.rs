//! The registration rule set
//!
//! One declarative entry per validated field. The browser shows
//! `required_message` / `format_message` next to the offending input while
//! the server lists `summary` on its error page.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{digits_only, has_min_chars, is_valid_email, is_valid_mobile};

/// Minimum number of characters in a full name
pub const MIN_NAME_CHARS: usize = 3;

/// Form fields that carry a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Course,
}

impl Field {
    /// Every validated field, in form order
    pub const ALL: [Field; 4] = [Field::FullName, Field::Email, Field::Phone, Field::Course];

    /// The HTML `name`/`id` of the input
    pub const fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullname",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Course => "course",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// How a raw value is cleaned before it is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    Trim,
    DigitsOnly,
}

/// Format check applied once the value is known to be non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// No check beyond non-empty
    Any,
    MinChars(usize),
    Email,
    /// 10 digits starting with 6-9
    Mobile,
}

/// Why a value failed its rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing,
    Malformed,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: Field,
    pub normalize: Normalize,
    pub format: Format,
    pub required_message: &'static str,
    /// Shown when the value is present but fails `format`
    pub format_message: Option<&'static str>,
    /// Server-side message for any violation of this rule
    pub summary: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        field: Field::FullName,
        normalize: Normalize::Trim,
        format: Format::MinChars(MIN_NAME_CHARS),
        required_message: "Full name is required.",
        format_message: Some("Enter a valid name (min 3 chars)."),
        summary: "Full name is required (min 3 chars).",
    },
    Rule {
        field: Field::Email,
        normalize: Normalize::Trim,
        format: Format::Email,
        required_message: "Email is required.",
        format_message: Some("Enter a valid email."),
        summary: "Valid email is required.",
    },
    Rule {
        field: Field::Phone,
        normalize: Normalize::DigitsOnly,
        format: Format::Mobile,
        required_message: "Mobile number is required.",
        format_message: Some("Enter a valid 10-digit mobile starting with 6-9."),
        summary: "Valid 10-digit mobile number is required.",
    },
    Rule {
        field: Field::Course,
        normalize: Normalize::Trim,
        format: Format::Any,
        required_message: "Please select a course.",
        format_message: None,
        summary: "Course selection is required.",
    },
];

/// Looks up the rule for `field`
pub fn rule_for(field: Field) -> &'static Rule {
    // RULES is ordered like Field::ALL
    &RULES[field as usize]
}

impl Rule {
    pub fn normalize(&self, raw: &str) -> String {
        match self.normalize {
            Normalize::Trim => raw.trim().to_string(),
            Normalize::DigitsOnly => digits_only(raw),
        }
    }

    /// Checks an already normalized value
    pub fn check_normalized(&self, value: &str) -> Result<(), Violation> {
        if value.is_empty() {
            return Err(Violation::Missing);
        }

        let ok = match self.format {
            Format::Any => true,
            Format::MinChars(min) => has_min_chars(value, min),
            Format::Email => is_valid_email(value),
            Format::Mobile => is_valid_mobile(value),
        };

        if ok {
            Ok(())
        } else {
            Err(Violation::Malformed)
        }
    }

    /// Normalizes `raw` and checks it
    pub fn check(&self, raw: &str) -> Result<(), Violation> {
        self.check_normalized(&self.normalize(raw))
    }

    /// Inline message for the browser
    pub fn client_message(&self, violation: Violation) -> &'static str {
        match violation {
            Violation::Missing => self.required_message,
            Violation::Malformed => self.format_message.unwrap_or(self.required_message),
        }
    }
}

/// A failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
    pub message: &'static str,
    pub summary: &'static str,
}

/// Validates one field, returning its inline message on failure
pub fn validate_field(field: Field, raw: &str) -> Option<&'static str> {
    let rule = rule_for(field);
    rule.check(raw).err().map(|v| rule.client_message(v))
}

/// Runs every rule and collects all failures in form order
///
/// `value` returns the raw submitted value of a field, or `None` if the
/// field was not submitted at all (treated as empty).
pub fn validate_all<'a, F>(value: F) -> Vec<FieldError>
where
    F: Fn(Field) -> Option<&'a str>,
{
    RULES
        .iter()
        .filter_map(|rule| {
            let raw = value(rule.field).unwrap_or("");
            rule.check(raw).err().map(|violation| FieldError {
                field: rule.field,
                violation,
                message: rule.client_message(violation),
                summary: rule.summary,
            })
        })
        .collect()
}
