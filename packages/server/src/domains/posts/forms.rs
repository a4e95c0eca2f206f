use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::models::{Post, PostFields};
use crate::common::forms::{checkbox, empty_as_none, error, single};
use crate::common::{CategoryId, Id, LocationId};

/// `<input type="datetime-local">` value format.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Create/edit form for a post. The author is never a form field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 256, message = "Enter a title of at most 256 characters."))]
    #[serde(default)]
    pub title: String,

    #[validate(length(min = 1, message = "This field is required."))]
    #[serde(default)]
    pub text: String,

    #[validate(custom(function = "validate_pub_date"))]
    #[serde(default)]
    pub pub_date: String,

    #[validate(custom(function = "validate_location"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,

    #[validate(custom(function = "validate_category"))]
    #[serde(default)]
    pub category: String,

    #[validate(length(max = 100, message = "Image path is too long."))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "checkbox")]
    pub is_published: bool,
}

impl PostForm {
    /// Blank form; publication defaults to now and the post to published.
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            pub_date: now.format(DATETIME_LOCAL_FORMAT).to_string(),
            is_published: true,
            ..Self::default()
        }
    }

    /// Form prefilled from an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            text: post.text.clone(),
            pub_date: post.pub_date.format(DATETIME_LOCAL_FORMAT).to_string(),
            location: post.location_id.map(|id| id.to_string()),
            category: post.category_id.map(|id| id.to_string()).unwrap_or_default(),
            image: post.image.clone(),
            is_published: post.is_published,
        }
    }

    /// Validate and convert into typed fields.
    ///
    /// Whether the chosen category/location exist is checked by the caller
    /// against the store.
    pub fn clean(&self) -> Result<PostFields, ValidationErrors> {
        self.validate()?;

        let pub_date = parse_datetime_local(&self.pub_date).map_err(|e| single("pub_date", e))?;
        let category_id: CategoryId =
            parse_choice(&self.category).map_err(|e| single("category", e))?;
        let location_id: Option<LocationId> = self
            .location
            .as_deref()
            .map(parse_choice)
            .transpose()
            .map_err(|e| single("location", e))?;

        Ok(PostFields {
            title: self.title.trim().to_string(),
            text: self.text.clone(),
            pub_date,
            image: self.image.clone(),
            location_id,
            category_id: Some(category_id),
            is_published: self.is_published,
        })
    }
}

/// Parse a `datetime-local` value (seconds optional) or RFC 3339, as UTC.
pub fn parse_datetime_local(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", "This field is required."));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|_| error("invalid", "Enter a valid date/time."))
}

fn parse_choice<T>(value: &str) -> Result<Id<T>, ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required."));
    }
    Id::parse(value.trim()).map_err(|_| invalid_choice())
}

pub fn invalid_choice() -> ValidationError {
    error(
        "invalid_choice",
        "Select a valid choice. That choice is not one of the available choices.",
    )
}

fn validate_pub_date(value: &str) -> Result<(), ValidationError> {
    parse_datetime_local(value).map(|_| ())
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    parse_choice::<crate::common::entity_ids::Category>(value).map(|_| ())
}

fn validate_location(value: &str) -> Result<(), ValidationError> {
    parse_choice::<crate::common::entity_ids::Location>(value).map(|_| ())
}
