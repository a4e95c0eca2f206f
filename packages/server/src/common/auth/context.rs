use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::common::error::{AppError, AppResult};
use crate::common::UserId;

/// Authenticated user, populated by the JWT middleware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

/// Per-request state handed explicitly to every action.
///
/// Carries who is asking (if anyone) and the path they asked for, so a
/// login redirect can bring them back.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub actor: Option<AuthUser>,
    pub path: String,
}

impl RequestContext {
    pub fn authenticated(user: AuthUser, path: impl Into<String>) -> Self {
        Self {
            actor: Some(user),
            path: path.into(),
        }
    }

    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            actor: None,
            path: path.into(),
        }
    }

    pub fn actor_id(&self) -> Option<UserId> {
        self.actor.as_ref().map(|a| a.user_id)
    }

    /// Require a logged-in actor; anonymous requests are sent to the login page.
    pub fn require_login(&self) -> AppResult<&AuthUser> {
        self.actor.as_ref().ok_or_else(|| AppError::LoginRequired {
            next: self.path.clone(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(Self {
            actor: parts.extensions.get::<AuthUser>().cloned(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_login_anonymous() {
        let ctx = RequestContext::anonymous("/posts/create/");
        match ctx.require_login() {
            Err(AppError::LoginRequired { next }) => assert_eq!(next, "/posts/create/"),
            other => panic!("expected LoginRequired, got {:?}", other),
        }
    }

    #[test]
    fn test_require_login_authenticated() {
        let user = AuthUser {
            user_id: UserId::new(),
            username: "alice".to_string(),
        };
        let ctx = RequestContext::authenticated(user.clone(), "/");
        assert_eq!(ctx.require_login().unwrap(), &user);
        assert_eq!(ctx.actor_id(), Some(user.user_id));
    }

    #[tokio::test]
    async fn test_extractor_reads_extensions_and_path() {
        let user = AuthUser {
            user_id: UserId::new(),
            username: "bob".to_string(),
        };
        let mut request = axum::http::Request::builder()
            .uri("/posts/create/?x=1")
            .body(())
            .unwrap();
        request.extensions_mut().insert(user.clone());
        let (mut parts, _) = request.into_parts();

        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.actor, Some(user));
        assert_eq!(ctx.path, "/posts/create/?x=1");
    }
}
