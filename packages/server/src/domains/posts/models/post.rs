use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

use crate::common::display::short;
use crate::common::{CategoryId, LocationId, PostId, UserId};

/// Blog post. Scheduled publication is a `pub_date` in the future.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author_id: UserId,
    pub location_id: Option<LocationId>,
    pub category_id: Option<CategoryId>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Author-editable fields of a post, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub location_id: Option<LocationId>,
    pub category_id: Option<CategoryId>,
    pub is_published: bool,
}

impl Post {
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    pub async fn create(author_id: UserId, fields: &PostFields, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO posts (id, title, text, pub_date, image, author_id, location_id, category_id, is_published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(PostId::new())
        .bind(&fields.title)
        .bind(&fields.text)
        .bind(fields.pub_date)
        .bind(&fields.image)
        .bind(author_id)
        .bind(fields.location_id)
        .bind(fields.category_id)
        .bind(fields.is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Overwrite the editable fields. Author and creation time never change.
    pub async fn update(id: PostId, fields: &PostFields, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            UPDATE posts
            SET title = $2, text = $3, pub_date = $4, image = $5,
                location_id = $6, category_id = $7, is_published = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.text)
        .bind(fields.pub_date)
        .bind(&fields.image)
        .bind(fields.location_id)
        .bind(fields.category_id)
        .bind(fields.is_published)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Delete a post together with its comments.
    pub async fn delete(id: PostId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Public visibility, given the publish flag of the post's category.
    ///
    /// `category_published` is `None` when the post has no category, which
    /// never satisfies the filter.
    pub fn is_visible_at(&self, category_published: Option<bool>, now: DateTime<Utc>) -> bool {
        self.is_published && self.pub_date <= now && category_published == Some(true)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short(&self.title))
    }
}
