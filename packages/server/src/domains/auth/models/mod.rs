pub mod user;

pub use user::{is_unique_violation, User};
