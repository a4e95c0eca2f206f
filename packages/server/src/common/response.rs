//! What an action hands back to the HTTP layer.
//!
//! Template rendering is owned by a collaborator: the core only names the
//! template and supplies its context. Over HTTP that pair is a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{json, Value};

/// A template name plus the context mapping it is rendered with.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub template: &'static str,
    pub status: StatusCode,
    pub context: Value,
}

impl Rendered {
    pub fn new(template: &'static str, context: Value) -> Self {
        Self {
            template,
            status: StatusCode::OK,
            context,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "template": self.template,
                "context": self.context,
            })),
        )
            .into_response()
    }
}

/// Result of a view action: render something, or send the client elsewhere.
#[derive(Debug, Clone)]
pub enum Outcome {
    Render(Rendered),
    Redirect(String),
}

impl Outcome {
    pub fn render(template: &'static str, context: Value) -> Self {
        Self::Render(Rendered::new(template, context))
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(location.into())
    }

    /// Redirect target, if this outcome is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect(location) => Some(location),
            Self::Render(_) => None,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Render(rendered) => rendered.into_response(),
            Self::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}
