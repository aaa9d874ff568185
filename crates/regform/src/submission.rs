// File: src/submission.rs
// Purpose: The validated registration record

use regform_validation_core::{rule_for, validate_all, Field};

use crate::error::ErrorList;
use crate::request_context::FormData;

pub const NOT_PROVIDED: &str = "Not provided";
pub const NOT_SPECIFIED: &str = "Not specified";

/// A registration that passed every rule
///
/// Text is trimmed and the phone number is digits only. Values are stored
/// raw; escaping happens when a page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub course: String,
}

impl RegistrationSubmission {
    /// Validates `form` against the shared rules
    ///
    /// Every violation is collected, in form order, before returning.
    pub fn from_form(form: &FormData) -> Result<Self, ErrorList> {
        let errors = validate_all(|field| form.get(field.name()).map(String::as_str));
        if !errors.is_empty() {
            return Err(errors.iter().map(|e| e.summary).collect());
        }

        let value = |field: Field| {
            let raw = form.get(field.name()).map(String::as_str).unwrap_or("");
            rule_for(field).normalize(raw)
        };
        let optional = |name: &str| form.get_non_empty(name).map(str::to_string);

        Ok(Self {
            full_name: value(Field::FullName),
            email: value(Field::Email),
            phone: value(Field::Phone),
            date_of_birth: optional("dob"),
            gender: optional("gender"),
            address: optional("address"),
            course: value(Field::Course),
        })
    }

    pub fn date_of_birth_display(&self) -> &str {
        self.date_of_birth.as_deref().unwrap_or(NOT_PROVIDED)
    }

    pub fn gender_display(&self) -> &str {
        self.gender.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn address_display(&self) -> &str {
        self.address.as_deref().unwrap_or(NOT_PROVIDED)
    }
}
