//! Profile page and profile editing.

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use validator::{Validate, ValidationErrors};

use super::forms::ProfileForm;
use crate::common::forms::field_errors;
use crate::common::{urls, AppError, AppResult, Outcome, Paginator, RequestContext};
use crate::domains::auth::actions::current_user;
use crate::domains::auth::User;
use crate::domains::posts::PostQuery;

const EDIT_TEMPLATE: &str = "blog/user.html";

/// A user's posts. The owner sees all of them, including drafts and
/// scheduled posts; everyone else sees only publicly visible ones.
pub async fn profile(
    ctx: &RequestContext,
    username: &str,
    page: Option<&str>,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let user = User::find_by_username(username, pool)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut query = PostQuery::all().by_author(user.id);
    if ctx.actor_id() != Some(user.id) {
        query = query.visible_at(Utc::now());
    }

    let paginator = Paginator::new(query.count(pool).await?);
    let number = paginator.resolve(page)?;
    let posts = query.fetch(paginator.window(number), pool).await?;

    Ok(Outcome::render(
        "blog/profile.html",
        json!({
            "profile": user,
            "page_obj": paginator.page(number, posts),
        }),
    ))
}

pub async fn edit_form(ctx: &RequestContext, username: &str, pool: &PgPool) -> AppResult<Outcome> {
    let user = match own_account(ctx, username, pool).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    Ok(render(&ProfileForm::from_user(&user), None))
}

pub async fn update(
    ctx: &RequestContext,
    username: &str,
    form: ProfileForm,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let user = match own_account(ctx, username, pool).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    if let Err(errors) = form.validate() {
        return Ok(render(&form, Some(&errors)));
    }

    let user = User::update_profile(
        user.id,
        form.first_name.trim(),
        form.last_name.trim(),
        form.email.as_deref().unwrap_or_default(),
        pool,
    )
    .await?;
    info!(user_id = %user.id, "Profile updated");

    Ok(Outcome::redirect(urls::profile(&user.username)))
}

/// The actor's own account. Another user's edit page redirects to that
/// user's read-only profile.
async fn own_account(
    ctx: &RequestContext,
    username: &str,
    pool: &PgPool,
) -> AppResult<Result<User, Outcome>> {
    let actor = ctx.require_login()?;

    if actor.username != username {
        return Ok(Err(Outcome::redirect(urls::profile(username))));
    }

    Ok(Ok(current_user(ctx, pool).await?))
}

fn render(form: &ProfileForm, errors: Option<&ValidationErrors>) -> Outcome {
    Outcome::render(
        EDIT_TEMPLATE,
        json!({
            "form": form,
            "errors": errors.map(field_errors).unwrap_or_default(),
        }),
    )
}
