// File: src/form_field.rs
// Purpose: Input attributes derived from the shared rule set

use regform_validation_core::{rule_for, Field, Format};
use serde_json::json;

/// HTML5 pattern for a mobile number: ten digits, the first 6-9, with any
/// separators in between since the server keeps digits only
pub const MOBILE_PATTERN: &str = "[^0-9]*[6-9](?:[^0-9]*[0-9]){9}[^0-9]*";

/// Attributes for one validated input
///
/// `data_validate` is read by the client script; the HTML5 attributes are
/// what the browser checks when the wasm validator is not available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAttrs {
    pub input_type: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
    pub pattern: Option<&'static str>,
    /// JSON for the data-validate attribute
    pub data_validate: String,
    /// Inline messages, so the HTML5 fallback shows the same text
    pub required_message: &'static str,
    pub format_message: Option<&'static str>,
}

impl FieldAttrs {
    pub fn for_field(field: Field) -> Self {
        let rule = rule_for(field);

        let (input_type, min_length, pattern, rules) = match rule.format {
            Format::Any => ("text", None, None, json!({ "required": true })),
            Format::MinChars(min) => (
                "text",
                Some(min),
                None,
                json!({ "required": true, "minLength": min }),
            ),
            Format::Email => ("email", None, None, json!({ "required": true, "email": true })),
            Format::Mobile => (
                "tel",
                None,
                Some(MOBILE_PATTERN),
                json!({ "required": true, "mobile": true }),
            ),
        };

        Self {
            input_type,
            required: true,
            min_length,
            pattern,
            data_validate: rules.to_string(),
            required_message: rule.required_message,
            format_message: rule.format_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_attrs() {
        let attrs = FieldAttrs::for_field(Field::FullName);
        assert_eq!(attrs.input_type, "text");
        assert_eq!(attrs.min_length, Some(3));
        assert_eq!(attrs.data_validate, r#"{"minLength":3,"required":true}"#);
    }

    #[test]
    fn test_email_and_phone_attrs() {
        let email = FieldAttrs::for_field(Field::Email);
        assert_eq!(email.input_type, "email");
        assert_eq!(email.data_validate, r#"{"email":true,"required":true}"#);

        let phone = FieldAttrs::for_field(Field::Phone);
        assert_eq!(phone.input_type, "tel");
        assert_eq!(phone.min_length, None);
        assert_eq!(phone.pattern, Some(MOBILE_PATTERN));
        assert_eq!(phone.data_validate, r#"{"mobile":true,"required":true}"#);
    }

    #[test]
    fn test_messages_come_from_rules() {
        let phone = FieldAttrs::for_field(Field::Phone);
        assert_eq!(phone.required_message, "Mobile number is required.");
        assert_eq!(
            phone.format_message,
            Some("Enter a valid 10-digit mobile starting with 6-9.")
        );

        let course = FieldAttrs::for_field(Field::Course);
        assert_eq!(course.required_message, "Please select a course.");
        assert_eq!(course.format_message, None);
        assert_eq!(course.pattern, None);
    }

    #[test]
    fn test_every_field_is_required() {
        for field in Field::ALL {
            assert!(FieldAttrs::for_field(field).required);
        }
    }
}
