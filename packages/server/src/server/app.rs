//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{auth, categories, comments, health_handler, not_found, pages, posts, profiles};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            db_pool,
            jwt_service: Arc::new(jwt_service),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);
    let jwt_service_for_middleware = state.jwt_service.clone();

    Router::new()
        // Blog
        .route("/", get(posts::index))
        .route("/posts/create/", get(posts::create_form).post(posts::create))
        .route("/posts/:post_id/", get(posts::detail))
        .route("/posts/:post_id/edit/", get(posts::edit_form).post(posts::update))
        .route("/posts/:post_id/delete/", get(posts::delete_confirm).post(posts::delete))
        .route("/posts/:post_id/comment/", post(comments::add))
        .route(
            "/posts/:post_id/edit_comment/:comment_id/",
            get(comments::edit_form).post(comments::update),
        )
        .route(
            "/posts/:post_id/delete_comment/:comment_id/",
            get(comments::delete_confirm).post(comments::delete),
        )
        .route("/category/:category_slug/", get(categories::detail))
        .route("/profile/:username/", get(profiles::profile))
        .route("/profile/:username/edit/", get(profiles::edit_form).post(profiles::update))
        // Accounts
        .route("/auth/registration/", get(auth::registration_form).post(auth::register))
        .route("/auth/login/", get(auth::login_form).post(auth::login))
        .route("/auth/logout/", get(auth::logout).post(auth::logout))
        // Static pages
        .route("/pages/about/", get(pages::about))
        .route("/pages/rules/", get(pages::rules))
        // Health check
        .route("/health", get(health_handler))
        .fallback(not_found)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
}

/// CORS: the configured origins, or any origin when none are configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
