use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

use crate::common::display::short;
use crate::common::CategoryId;

/// Post category, addressed in URLs by its slug.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// Look up a category for its public page; unpublished ones do not exist.
    pub async fn find_published_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>(
            "SELECT * FROM categories WHERE slug = $1 AND is_published = TRUE",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;
        Ok(category)
    }

    /// All categories, for the post form's choices.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Self>("SELECT * FROM categories ORDER BY title ASC")
            .fetch_all(pool)
            .await?;
        Ok(categories)
    }

    pub async fn create(
        title: &str,
        description: &str,
        slug: &str,
        is_published: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        if !is_valid_slug(slug) {
            bail!("Invalid slug: {:?}", slug);
        }

        let category = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO categories (id, title, description, slug, is_published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(CategoryId::new())
        .bind(title)
        .bind(description)
        .bind(slug)
        .bind(is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    pub async fn set_published(id: CategoryId, is_published: bool, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE categories SET is_published = $2 WHERE id = $1")
            .bind(id)
            .bind(is_published)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a category; its posts survive with `category_id` nulled.
    pub async fn delete(id: CategoryId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short(&self.title))
    }
}

/// Slugs are non-empty and limited to ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
