use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

use crate::common::display::short;
use crate::common::{CommentId, PostId, UserId, Window};

/// Comment on a post. Comments read oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub post_id: PostId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Comment with its author's username, as listed under a post.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    pub author_username: String,
}

impl Comment {
    pub async fn find_by_id(id: CommentId, pool: &PgPool) -> Result<Option<Self>> {
        let comment = sqlx::query_as::<_, Self>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(comment)
    }

    /// Find a comment only if it belongs to `post_id`.
    pub async fn find_for_post(
        post_id: PostId,
        id: CommentId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let comment = sqlx::query_as::<_, Self>(
            "SELECT * FROM comments WHERE id = $1 AND post_id = $2",
        )
        .bind(id)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;
        Ok(comment)
    }

    pub async fn count_for_post(post_id: PostId, pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn list_for_post(
        post_id: PostId,
        window: Window,
        pool: &PgPool,
    ) -> Result<Vec<CommentListing>> {
        let comments = sqlx::query_as::<_, CommentListing>(
            r#"
            SELECT cm.*, u.username AS author_username
            FROM comments cm
            INNER JOIN users u ON u.id = cm.author_id
            WHERE cm.post_id = $1
            ORDER BY cm.created_at ASC, cm.id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(pool)
        .await?;
        Ok(comments)
    }

    pub async fn create(
        post_id: PostId,
        author_id: UserId,
        text: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let comment = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO comments (id, text, post_id, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(CommentId::new())
        .bind(text)
        .bind(post_id)
        .bind(author_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(comment)
    }

    pub async fn update_text(id: CommentId, text: &str, pool: &PgPool) -> Result<Self> {
        let comment = sqlx::query_as::<_, Self>(
            "UPDATE comments SET text = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(text)
        .fetch_one(pool)
        .await?;
        Ok(comment)
    }

    pub async fn delete(id: CommentId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short(&self.text))
    }
}
