//! Composable post listing queries.
//!
//! Every public listing goes through `PostQuery`, so the visibility rule
//! lives in exactly one SQL fragment:
//!
//! ```text
//! p.is_published AND p.pub_date <= now AND c.is_published
//! ```
//!
//! The category join is a LEFT JOIN, so a post without a category yields a
//! NULL `c.is_published` and drops out, exactly as an inner join would.
//! Comment counts are aggregated in the same statement.
//!
//! ```rust,ignore
//! let query = PostQuery::visible(Utc::now()).in_category(category.id);
//! let paginator = Paginator::new(query.count(pool).await?);
//! let posts = query.fetch(paginator.window(1), pool).await?;
//! ```

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::post::Post;
use crate::common::{CategoryId, PostId, UserId, Window};

/// A post as shown in listings: joined display fields plus its comment count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    pub author_username: String,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub category_is_published: Option<bool>,
    pub location_name: Option<String>,
    pub comment_count: i64,
}

impl PostListing {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.post.is_visible_at(self.category_is_published, now)
    }
}

/// Filter set for post listings. Filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    visible_at: Option<DateTime<Utc>>,
    category_id: Option<CategoryId>,
    author_id: Option<UserId>,
    post_id: Option<PostId>,
}

impl PostQuery {
    /// Every post, regardless of publication state.
    pub fn all() -> Self {
        Self::default()
    }

    /// Posts a non-owner may see at `now`.
    pub fn visible(now: DateTime<Utc>) -> Self {
        Self::all().visible_at(now)
    }

    pub fn visible_at(mut self, now: DateTime<Utc>) -> Self {
        self.visible_at = Some(now);
        self
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn by_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_id(mut self, post_id: PostId) -> Self {
        self.post_id = Some(post_id);
        self
    }

    /// Number of matching posts, for pagination.
    pub async fn count(&self, pool: &PgPool) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts p");
        qb.push(" LEFT JOIN categories c ON c.id = p.category_id");
        self.push_filters(&mut qb);

        let count = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
        Ok(count)
    }

    /// One page of matching posts, newest publication first.
    pub async fn fetch(&self, window: Window, pool: &PgPool) -> Result<Vec<PostListing>> {
        let mut qb = self.listing_query();
        qb.push(" LIMIT ");
        qb.push_bind(window.limit);
        qb.push(" OFFSET ");
        qb.push_bind(window.offset);

        let posts = qb.build_query_as::<PostListing>().fetch_all(pool).await?;
        Ok(posts)
    }

    /// First matching post, if any. Mostly useful combined with `with_id`.
    pub async fn fetch_one(&self, pool: &PgPool) -> Result<Option<PostListing>> {
        let mut qb = self.listing_query();
        qb.push(" LIMIT 1");

        let post = qb
            .build_query_as::<PostListing>()
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    fn listing_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.*,
                   u.username AS author_username,
                   c.title AS category_title,
                   c.slug AS category_slug,
                   c.is_published AS category_is_published,
                   l.name AS location_name,
                   COUNT(cm.id) AS comment_count
            FROM posts p
            INNER JOIN users u ON u.id = p.author_id
            LEFT JOIN categories c ON c.id = p.category_id
            LEFT JOIN locations l ON l.id = p.location_id
            LEFT JOIN comments cm ON cm.post_id = p.id"#,
        );
        self.push_filters(&mut qb);
        qb.push(
            " GROUP BY p.id, u.username, c.title, c.slug, c.is_published, l.name \
             ORDER BY p.pub_date DESC, p.id DESC",
        );
        qb
    }

    fn push_filters(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(now) = self.visible_at {
            qb.push(" AND p.is_published = TRUE AND p.pub_date <= ");
            qb.push_bind(now);
            qb.push(" AND c.is_published = TRUE");
        }
        if let Some(category_id) = self.category_id {
            qb.push(" AND p.category_id = ");
            qb.push_bind(category_id);
        }
        if let Some(author_id) = self.author_id {
            qb.push(" AND p.author_id = ");
            qb.push_bind(author_id);
        }
        if let Some(post_id) = self.post_id {
            qb.push(" AND p.id = ");
            qb.push_bind(post_id);
        }
    }
}
