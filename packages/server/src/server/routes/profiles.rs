use axum::extract::{Extension, Form, Path, Query};

use crate::common::{AppResult, Outcome, PageParams, RequestContext};
use crate::domains::profiles::{actions, ProfileForm};
use crate::server::app::AppState;

pub async fn profile(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Outcome> {
    actions::profile(&ctx, &username, params.page.as_deref(), &state.db_pool).await
}

pub async fn edit_form(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(username): Path<String>,
) -> AppResult<Outcome> {
    actions::edit_form(&ctx, &username, &state.db_pool).await
}

pub async fn update(
    Extension(state): Extension<AppState>,
    ctx: RequestContext,
    Path(username): Path<String>,
    Form(form): Form<ProfileForm>,
) -> AppResult<Outcome> {
    actions::update(&ctx, &username, form, &state.db_pool).await
}
