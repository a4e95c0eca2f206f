//! Helpers shared by the HTML-form inputs of every domain.
//!
//! Browsers submit empty selects as `""` and unchecked checkboxes not at
//! all; the deserializers here normalize both. Validation failures are
//! flattened into `field -> [messages]` for the renderer.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

/// Key used for errors that belong to the form as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten validator output into messages keyed by field name.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Build a `ValidationError` with a human-readable message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// A single-field `ValidationErrors`.
pub fn single(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

/// `""` (and whitespace) deserialize as `None`.
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Checkbox semantics: present as `on`/`true`/`1` means checked.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Bool(b)) => b,
        Some(Raw::Text(s)) => matches!(s.as_str(), "on" | "true" | "1" | "yes"),
        None => false,
    })
}
