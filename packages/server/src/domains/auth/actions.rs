//! Registration, login and logout.

use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use validator::{Validate, ValidationErrors};

use super::forms::{LoginForm, RegistrationForm};
use super::jwt::JwtService;
use super::models::{is_unique_violation, User};
use super::password::{hash_password, verify_password};
use crate::common::forms::{error, field_errors, single, NON_FIELD_ERRORS};
use crate::common::{urls, AppError, AppResult, Outcome, RequestContext};

const REGISTRATION_TEMPLATE: &str = "registration/registration_form.html";
const LOGIN_TEMPLATE: &str = "registration/login.html";

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted; the caller stores `token` and follows `redirect`.
    LoggedIn { token: String, redirect: String },
    /// Credentials rejected; re-render the form.
    Rejected(Outcome),
}

/// The logged-in user as stored. A token that outlived its account counts
/// as no login at all.
pub async fn current_user(ctx: &RequestContext, pool: &PgPool) -> AppResult<User> {
    let actor = ctx.require_login()?;
    match User::find_by_id(actor.user_id, pool).await? {
        Some(user) => Ok(user),
        None => {
            info!(user_id = %actor.user_id, "Session refers to a deleted account");
            Err(AppError::LoginRequired {
                next: ctx.path.clone(),
            })
        }
    }
}

pub fn registration_form() -> Outcome {
    render_registration(&RegistrationForm::default(), None)
}

pub async fn register(form: RegistrationForm, pool: &PgPool) -> AppResult<Outcome> {
    if let Err(errors) = form.validate() {
        return Ok(render_registration(&form, Some(&errors)));
    }

    let password_hash = hash_password(&form.password1)?;
    match User::create(&form.username, &password_hash, pool).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "User registered");
            Ok(Outcome::redirect(urls::index()))
        }
        Err(e) if is_unique_violation(&e) => {
            let errors = single(
                "username",
                error("unique", "A user with that username already exists."),
            );
            Ok(render_registration(&form, Some(&errors)))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn login_form(next: Option<String>) -> Outcome {
    let form = LoginForm {
        next,
        ..LoginForm::default()
    };
    render_login(&form, None)
}

pub async fn login(form: LoginForm, jwt: &JwtService, pool: &PgPool) -> AppResult<LoginOutcome> {
    if let Err(errors) = form.validate() {
        return Ok(LoginOutcome::Rejected(render_login(&form, Some(&errors))));
    }

    let user = match User::find_by_username(&form.username, pool).await? {
        Some(user) if verify_password(&form.password, &user.password_hash)? => user,
        _ => {
            info!(username = %form.username, "Rejected login");
            let errors = single(
                NON_FIELD_ERRORS,
                error(
                    "invalid_login",
                    "Please enter a correct username and password. Note that both fields may be case-sensitive.",
                ),
            );
            return Ok(LoginOutcome::Rejected(render_login(&form, Some(&errors))));
        }
    };

    let token = jwt.create_token(user.id, &user.username)?;
    info!(user_id = %user.id, "User logged in");

    Ok(LoginOutcome::LoggedIn {
        token,
        redirect: form.redirect_target(),
    })
}

pub fn logged_out() -> Outcome {
    Outcome::render("registration/logged_out.html", json!({}))
}

fn render_registration(form: &RegistrationForm, errors: Option<&ValidationErrors>) -> Outcome {
    Outcome::render(
        REGISTRATION_TEMPLATE,
        json!({
            "form": form,
            "errors": errors.map(field_errors).unwrap_or_default(),
        }),
    )
}

fn render_login(form: &LoginForm, errors: Option<&ValidationErrors>) -> Outcome {
    Outcome::render(
        LOGIN_TEMPLATE,
        json!({
            "form": form,
            "errors": errors.map(field_errors).unwrap_or_default(),
        }),
    )
}
