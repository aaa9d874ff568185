//! regform Validation WASM
//!
//! WebAssembly bindings for the registration rules.
//! The browser gets instant per-field feedback from the exact rules the
//! server enforces.
//!
//! Build with `wasm-pack build --target web --out-dir ../../../static/pkg`.

use std::collections::HashMap;

use regform_validation_core as rules;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validation error returned to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Validate a single field value
///
/// Returns the inline error message, or `undefined` when the value passes.
/// Fields without a rule (dob, gender, address) always pass.
///
/// # Example (JavaScript)
/// ```javascript
/// const msg = validateField('phone', document.getElementById('phone').value);
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_name: &str, value: &str) -> Option<String> {
    let field = rules::Field::from_name(field_name)?;
    rules::validate_field(field, value).map(str::to_string)
}

/// Validate the whole form
///
/// `values` is a plain object of field name to raw value. Missing fields
/// count as empty. Returns an array of `{ field, message }` in form order.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(values: JsValue) -> Result<JsValue, JsValue> {
    let values: HashMap<String, String> = serde_wasm_bindgen::from_value(values)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form values: {}", e)))?;

    let errors = collect_errors(&values);

    Ok(serde_wasm_bindgen::to_value(&errors)?)
}

fn collect_errors(values: &HashMap<String, String>) -> Vec<ValidationError> {
    rules::validate_all(|field| values.get(field.name()).map(String::as_str))
        .into_iter()
        .map(|e| ValidationError {
            field: e.field.name().to_string(),
            message: e.message.to_string(),
        })
        .collect()
}

/// Strip everything but digits from a phone number
#[wasm_bindgen(js_name = normalizePhone)]
pub fn normalize_phone_js(value: &str) -> String {
    rules::digits_only(value)
}

/// Quick email shape check
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    rules::is_valid_email(email)
}
