use crate::common::AuthUser;
use crate::domains::auth::JwtService;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::{middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use time::Duration;
use tracing::debug;

use crate::domains::auth::jwt::TOKEN_TTL_HOURS;

/// Cookie the login view stores the session token in.
pub const SESSION_COOKIE: &str = "blog_session";

/// JWT authentication middleware
///
/// Takes the token from the `Authorization` header or the session cookie,
/// verifies it, and adds `AuthUser` to request extensions. Requests without
/// a valid token continue anonymously; views decide what that means.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(request.headers(), &jwt_service);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {} ({})", user.username, user.user_id);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the session token from request headers
fn extract_auth_user(headers: &HeaderMap, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = bearer_token(headers).or_else(|| cookie_token(headers))?;
    let claims = jwt_service.verify_token(&token).ok()?;

    Some(AuthUser {
        user_id: claims.user_id,
        username: claims.username,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE)?.value_trimmed();
    (!token.is_empty()).then(|| token.to_string())
}

/// Session cookie holding a freshly issued token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(TOKEN_TTL_HOURS))
        .build()
}

/// Cookie that tells the browser to drop the session.
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
