// Common types and utilities shared across the application

pub mod auth;
pub mod display;
pub mod entity_ids;
pub mod error;
pub mod forms;
pub mod id;
pub mod pagination;
pub mod response;
pub mod urls;

pub use auth::{can_mutate, owner_guard, Access, AuthUser, RequestContext};
pub use entity_ids::*;
pub use error::{AppError, AppResult};
pub use id::Id;
pub use pagination::{Page, PageParams, Paginator, Window, PAGE_SIZE};
pub use response::{Outcome, Rendered};
