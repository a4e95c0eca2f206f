use axum::extract::{Extension, Path, Query};

use crate::common::{AppResult, Outcome, PageParams};
use crate::domains::categories::actions;
use crate::server::app::AppState;

pub async fn detail(
    Extension(state): Extension<AppState>,
    Path(category_slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Outcome> {
    actions::detail(&category_slug, params.page.as_deref(), &state.db_pool).await
}
