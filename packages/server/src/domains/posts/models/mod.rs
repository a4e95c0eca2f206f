pub mod post;
pub mod query;

pub use post::{Post, PostFields};
pub use query::{PostListing, PostQuery};
