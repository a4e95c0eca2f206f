//! Owner guard for update and delete flows.
//!
//! A denied mutation is not an error page: the actor is sent to the
//! read-only view of the entity and the mutation never runs.
//!
//! ```rust,ignore
//! if let Access::RedirectTo(location) =
//!     owner_guard(ctx.actor.as_ref(), post.author_id, urls::post_detail(post.id))
//! {
//!     return Ok(Outcome::Redirect(location));
//! }
//! ```

use super::AuthUser;
use crate::common::UserId;

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allowed,
    RedirectTo(String),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed)
    }
}

/// True iff the actor is the recorded author.
pub fn can_mutate(actor: Option<&AuthUser>, author_id: UserId) -> bool {
    actor.is_some_and(|a| a.user_id == author_id)
}

/// Allow the author; redirect everyone else (anonymous included) to `fallback`.
pub fn owner_guard(actor: Option<&AuthUser>, author_id: UserId, fallback: String) -> Access {
    if can_mutate(actor, author_id) {
        Access::Allowed
    } else {
        tracing::debug!(author_id = %author_id, fallback = %fallback, "Owner guard denied mutation");
        Access::RedirectTo(fallback)
    }
}
