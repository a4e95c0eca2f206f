use axum::extract::{Extension, Form, Path, Query};

use super::parse_id;
use crate::common::{AppResult, Outcome, PageParams, RequestContext};
use crate::domains::posts::{actions, PostForm};
use crate::server::app::AppState;

pub async fn index(
    Extension(state): Extension<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Outcome> {
    actions::index(params.page.as_deref(), &state.db_pool).await
}

pub async fn detail(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::detail(&ctx, post_id, params.page.as_deref(), &state.db_pool).await
}

pub async fn create_form(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
) -> AppResult<Outcome> {
    actions::create_form(&ctx, &state.db_pool).await
}

pub async fn create(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Form(form): Form<PostForm>,
) -> AppResult<Outcome> {
    actions::create(&ctx, form, &state.db_pool).await
}

pub async fn edit_form(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::edit_form(&ctx, post_id, &state.db_pool).await
}

pub async fn update(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::update(&ctx, post_id, form, &state.db_pool).await
}

pub async fn delete_confirm(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::delete_confirm(&ctx, post_id, &state.db_pool).await
}

pub async fn delete(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(post_id): Path<String>,
) -> AppResult<Outcome> {
    let post_id = parse_id(&post_id)?;
    actions::delete(&ctx, post_id, &state.db_pool).await
}
