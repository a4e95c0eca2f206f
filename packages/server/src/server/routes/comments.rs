use axum::extract::{Extension, Form, Path};

use super::parse_id;
use crate::common::{AppResult, Outcome, RequestContext};
use crate::domains::comments::{actions, CommentForm};
use crate::server::app::AppState;

pub async fn add(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::add(&ctx, post_id, form, &state.db_pool).await
}

pub async fn edit_form(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> AppResult<Outcome> {
    actions::edit_form(&ctx, parse_id(&post_id)?, parse_id(&comment_id)?, &state.db_pool).await
}

pub async fn update(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path((post_id, comment_id)): Path<(String, String)>,
    Form(form): Form<CommentForm>,
) -> AppResult<Outcome> {
    actions::update(
        &ctx,
        parse_id(&post_id)?,
        parse_id(&comment_id)?,
        form,
        &state.db_pool,
    )
    .await
}

pub async fn delete_confirm(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> AppResult<Outcome> {
    actions::delete_confirm(&ctx, parse_id(&post_id)?, parse_id(&comment_id)?, &state.db_pool)
        .await
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> AppResult<Outcome> {
    actions::delete(&ctx, parse_id(&post_id)?, parse_id(&comment_id)?, &state.db_pool).await
}
