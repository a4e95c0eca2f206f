use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use thiserror::Error;

use super::response::Rendered;
use super::urls;

/// Failures surfaced at the request boundary.
///
/// Owner-guard denials and form validation errors are not in here: the
/// first is a redirect (`Access::RedirectTo`), the second re-renders the
/// form.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Authentication required")]
    LoginRequired { next: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => Rendered::new("pages/404.html", json!({}))
                .with_status(StatusCode::NOT_FOUND)
                .into_response(),
            AppError::LoginRequired { next } => Redirect::to(&urls::login(&next)).into_response(),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                internal_error_page()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                internal_error_page()
            }
        }
    }
}

fn internal_error_page() -> Response {
    Rendered::new("pages/500.html", json!({}))
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}
