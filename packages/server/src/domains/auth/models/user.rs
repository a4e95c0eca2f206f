use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::UserId;

/// A registered user; authors posts and comments.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Insert a user. A taken username surfaces as a unique violation.
    pub async fn create(username: &str, password_hash: &str, pool: &PgPool) -> Result<Self> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, username, password_hash, date_joined)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    pub async fn update_profile(
        id: UserId,
        first_name: &str,
        last_name: &str,
        email: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Delete a user; their posts and comments go with them.
    pub async fn delete(id: UserId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// True if the error is a unique-constraint violation from Postgres.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}
