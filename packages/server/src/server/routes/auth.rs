use axum::extract::{Extension, Form, Query};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::common::{AppResult, Outcome};
use crate::domains::auth::actions::{self, LoginOutcome};
use crate::domains::auth::{LoginForm, RegistrationForm};
use crate::server::app::AppState;
use crate::server::middleware::{expired_session_cookie, session_cookie};

#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}

pub async fn registration_form() -> Outcome {
    actions::registration_form()
}

pub async fn register(
    Extension(state): Extension<AppState>,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Outcome> {
    actions::register(form, &state.db_pool).await
}

pub async fn login_form(Query(params): Query<NextParams>) -> Outcome {
    actions::login_form(params.next)
}

pub async fn login(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let response = match actions::login(form, &state.jwt_service, &state.db_pool).await? {
        LoginOutcome::LoggedIn { token, redirect } => {
            (jar.add(session_cookie(&token)), Redirect::to(&redirect)).into_response()
        }
        LoginOutcome::Rejected(outcome) => outcome.into_response(),
    };
    Ok(response)
}

pub async fn logout(jar: CookieJar) -> Response {
    (jar.add(expired_session_cookie()), actions::logged_out()).into_response()
}
