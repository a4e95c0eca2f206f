use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

use super::models::Category;
use crate::common::{AppError, AppResult, Outcome, Paginator};
use crate::domains::posts::PostQuery;

/// Category page: visible posts in a published category.
///
/// An unpublished category is not found, whatever state its posts are in.
pub async fn detail(slug: &str, page: Option<&str>, pool: &PgPool) -> AppResult<Outcome> {
    let category = Category::find_published_by_slug(slug, pool)
        .await?
        .ok_or(AppError::NotFound)?;

    let query = PostQuery::visible(Utc::now()).in_category(category.id);
    let paginator = Paginator::new(query.count(pool).await?);
    let number = paginator.resolve(page)?;
    let posts = query.fetch(paginator.window(number), pool).await?;

    Ok(Outcome::render(
        "blog/category.html",
        json!({
            "category": category,
            "page_obj": paginator.page(number, posts),
        }),
    ))
}
