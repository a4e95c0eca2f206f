use serde::{Deserialize, Serialize};
use validator::Validate;

/// Comment form; post and author come from the request, not the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(default)]
    pub text: String,
}

fn validate_not_blank(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        Err(crate::common::forms::error("required", "This field is required."))
    } else {
        Ok(())
    }
}
