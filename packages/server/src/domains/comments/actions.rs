//! Comment views: add, edit, delete.

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use validator::{Validate, ValidationErrors};

use super::forms::CommentForm;
use super::models::Comment;
use crate::common::forms::field_errors;
use crate::common::{
    owner_guard, urls, Access, AppError, AppResult, CommentId, Outcome, PostId, RequestContext,
};
use crate::domains::auth::actions::current_user;
use crate::domains::posts::PostQuery;

const TEMPLATE: &str = "blog/comment.html";

/// Comment on a post. Only publicly visible posts take comments, even from
/// their own author.
pub async fn add(
    ctx: &RequestContext,
    post_id: PostId,
    form: CommentForm,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let author = current_user(ctx, pool).await?;

    let post = PostQuery::visible(Utc::now())
        .with_id(post_id)
        .fetch_one(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Err(errors) = form.validate() {
        return Ok(render(&form, post_id, None, Some(&errors)));
    }

    let comment = Comment::create(post.post.id, author.id, &form.text, pool).await?;
    info!(comment_id = %comment.id, post_id = %post_id, author = %author.username, "Comment added");

    Ok(Outcome::redirect(urls::post_detail(post_id)))
}

pub async fn edit_form(
    ctx: &RequestContext,
    post_id: PostId,
    comment_id: CommentId,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let comment = match guarded_comment(ctx, post_id, comment_id, pool).await? {
        Ok(comment) => comment,
        Err(redirect) => return Ok(redirect),
    };

    let form = CommentForm {
        text: comment.text.clone(),
    };
    Ok(render(&form, post_id, Some(&comment), None))
}

pub async fn update(
    ctx: &RequestContext,
    post_id: PostId,
    comment_id: CommentId,
    form: CommentForm,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let comment = match guarded_comment(ctx, post_id, comment_id, pool).await? {
        Ok(comment) => comment,
        Err(redirect) => return Ok(redirect),
    };

    if let Err(errors) = form.validate() {
        return Ok(render(&form, post_id, Some(&comment), Some(&errors)));
    }

    Comment::update_text(comment.id, &form.text, pool).await?;
    info!(comment_id = %comment.id, post_id = %post_id, "Comment updated");

    Ok(Outcome::redirect(urls::post_detail(post_id)))
}

pub async fn delete_confirm(
    ctx: &RequestContext,
    post_id: PostId,
    comment_id: CommentId,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let comment = match guarded_comment(ctx, post_id, comment_id, pool).await? {
        Ok(comment) => comment,
        Err(redirect) => return Ok(redirect),
    };

    Ok(Outcome::render(TEMPLATE, json!({ "comment": comment })))
}

pub async fn delete(
    ctx: &RequestContext,
    post_id: PostId,
    comment_id: CommentId,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let comment = match guarded_comment(ctx, post_id, comment_id, pool).await? {
        Ok(comment) => comment,
        Err(redirect) => return Ok(redirect),
    };

    Comment::delete(comment.id, pool).await?;
    info!(comment_id = %comment.id, post_id = %post_id, "Comment deleted");

    Ok(Outcome::redirect(urls::post_detail(post_id)))
}

/// Login check, lookup scoped to the post, then the owner guard.
///
/// `Ok(Err(outcome))` is the redirect that replaces the mutation.
async fn guarded_comment(
    ctx: &RequestContext,
    post_id: PostId,
    comment_id: CommentId,
    pool: &PgPool,
) -> AppResult<Result<Comment, Outcome>> {
    ctx.require_login()?;

    let comment = Comment::find_for_post(post_id, comment_id, pool)
        .await?
        .ok_or(AppError::NotFound)?;

    match owner_guard(ctx.actor.as_ref(), comment.author_id, urls::post_detail(post_id)) {
        Access::Allowed => Ok(Ok(comment)),
        Access::RedirectTo(location) => Ok(Err(Outcome::Redirect(location))),
    }
}

fn render(
    form: &CommentForm,
    post_id: PostId,
    comment: Option<&Comment>,
    errors: Option<&ValidationErrors>,
) -> Outcome {
    Outcome::render(
        TEMPLATE,
        json!({
            "form": form,
            "post_id": post_id,
            "comment": comment,
            "errors": errors.map(field_errors).unwrap_or_default(),
        }),
    )
}
