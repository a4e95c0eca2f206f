//! Categories domain - published groupings of posts addressed by slug.

pub mod actions;
pub mod models;

pub use models::{is_valid_slug, Category};
