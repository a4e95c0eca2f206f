use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::forms::{empty_as_none, error};

/// Sign-up form: username plus a confirmed password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(
        length(min = 1, max = 150, message = "Enter a username of at most 150 characters."),
        custom(function = "validate_username")
    )]
    #[serde(default)]
    pub username: String,

    #[validate(length(min = 8, message = "This password is too short. It must contain at least 8 characters."))]
    #[serde(default, skip_serializing)]
    pub password1: String,

    #[validate(must_match(other = "password1", message = "The two password fields didn't match."))]
    #[serde(default, skip_serializing)]
    pub password2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "This field is required."))]
    #[serde(default)]
    pub username: String,

    #[validate(length(min = 1, message = "This field is required."))]
    #[serde(default, skip_serializing)]
    pub password: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub next: Option<String>,
}

impl LoginForm {
    /// Where to go after logging in. Only local paths are honoured.
    pub fn redirect_target(&self) -> String {
        match self.next.as_deref() {
            Some(next) if is_local_path(next) => next.to_string(),
            _ => crate::common::urls::index(),
        }
    }
}

/// An absolute path on this site: no scheme, no authority, and nothing a
/// browser might read as one (`//host`, `/\host`).
fn is_local_path(next: &str) -> bool {
    if !next.starts_with('/') || next.starts_with("//") {
        return false;
    }
    if next.chars().any(|c| c == '\\' || c.is_control()) {
        return false;
    }
    next.parse::<axum::http::Uri>()
        .is_ok_and(|uri| uri.scheme().is_none() && uri.authority().is_none())
}

/// Letters, digits and `@.+-_` only.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        Ok(())
    } else {
        Err(error(
            "invalid_username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ))
    }
}
