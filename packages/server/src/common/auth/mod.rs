//! Request identity and authorization predicates.
//!
//! Two orthogonal checks, composed explicitly in each action:
//!
//! - `RequestContext::require_login` - anonymous requests go to the login page
//! - `owner_guard` - non-authors are redirected to the read-only view

mod context;
mod guard;

pub use context::{AuthUser, RequestContext};
pub use guard::{can_mutate, owner_guard, Access};
