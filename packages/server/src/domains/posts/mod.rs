//! Posts domain - authoring, scheduled publication and public visibility.

pub mod actions;
pub mod forms;
pub mod models;

pub use forms::PostForm;
pub use models::{Post, PostFields, PostListing, PostQuery};
