//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.
//! Names get a random suffix since every test shares one database.

use anyhow::Result;
use blog_core::domains::auth::password::hash_password;
use blog_core::domains::auth::User;
use blog_core::domains::categories::Category;
use blog_core::domains::locations::Location;
use blog_core::domains::posts::{Post, PostFields};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Create a user whose password is `TEST_PASSWORD`.
pub async fn create_user(pool: &PgPool, name: &str) -> Result<User> {
    let hash = hash_password(TEST_PASSWORD)?;
    User::create(&unique(name), &hash, pool).await
}

pub async fn create_category(pool: &PgPool, slug: &str, is_published: bool) -> Result<Category> {
    let slug = unique(slug);
    Category::create(&slug, "Test category", &slug, is_published, pool).await
}

pub async fn create_location(pool: &PgPool, name: &str) -> Result<Location> {
    Location::create(name, true, pool).await
}

/// Published post dated an hour ago.
pub fn post_fields(title: &str, category: &Category) -> PostFields {
    PostFields {
        title: title.to_string(),
        text: format!("{} body", title),
        pub_date: Utc::now() - Duration::hours(1),
        image: None,
        location_id: None,
        category_id: Some(category.id),
        is_published: true,
    }
}

pub async fn create_post(
    pool: &PgPool,
    author: &User,
    category: &Category,
    title: &str,
) -> Result<Post> {
    Post::create(author.id, &post_fields(title, category), pool).await
}

pub async fn create_post_at(
    pool: &PgPool,
    author: &User,
    category: &Category,
    title: &str,
    pub_date: DateTime<Utc>,
) -> Result<Post> {
    let fields = PostFields {
        pub_date,
        ..post_fields(title, category)
    };
    Post::create(author.id, &fields, pool).await
}
