use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

use crate::common::display::short;
use crate::common::LocationId;

/// Place a post was written about.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub async fn find_by_id(id: LocationId, pool: &PgPool) -> Result<Option<Self>> {
        let location = sqlx::query_as::<_, Self>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(location)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let locations = sqlx::query_as::<_, Self>("SELECT * FROM locations ORDER BY name ASC")
            .fetch_all(pool)
            .await?;
        Ok(locations)
    }

    pub async fn create(name: &str, is_published: bool, pool: &PgPool) -> Result<Self> {
        let location = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO locations (id, name, is_published, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(LocationId::new())
        .bind(name)
        .bind(is_published)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(location)
    }

    /// Delete a location; posts keep existing with `location_id` nulled.
    pub async fn delete(id: LocationId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short(&self.name))
    }
}
