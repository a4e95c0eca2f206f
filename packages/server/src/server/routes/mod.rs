// HTTP routes - thin adapters from axum extractors to domain actions
pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod pages;
pub mod posts;
pub mod profiles;

pub use health::*;

use crate::common::{AppError, AppResult, Id};

/// Parse an id path segment; malformed ids are simply not found.
pub(crate) fn parse_id<T>(raw: &str) -> AppResult<Id<T>> {
    Id::parse(raw).map_err(|_| AppError::NotFound)
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
