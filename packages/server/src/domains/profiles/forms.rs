use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::forms::empty_as_none;
use crate::domains::auth::User;

/// Editable profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    #[serde(default)]
    pub last_name: String,

    #[validate(email(message = "Enter a valid email address."))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: Some(user.email.clone()).filter(|e| !e.is_empty()),
        }
    }
}
