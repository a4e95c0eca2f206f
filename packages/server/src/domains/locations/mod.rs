//! Locations domain - places posts are tagged with.

pub mod models;

pub use models::Location;
