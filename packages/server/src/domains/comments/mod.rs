//! Comments domain - discussion under published posts.

pub mod actions;
pub mod forms;
pub mod models;

pub use forms::CommentForm;
pub use models::{Comment, CommentListing};
