pub mod category;

pub use category::{is_valid_slug, Category};
