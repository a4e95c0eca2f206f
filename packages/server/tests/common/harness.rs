//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared by every test in a binary. It is started
//! and migrated on first use. Tests create their own rows with unique names,
//! so they never depend on each other's data.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use blog_core::common::{AuthUser, Outcome, RequestContext};
use blog_core::domains::auth::{JwtService, User};
use blog_core::server::{build_app, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool on the shared database.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let user = fixtures::create_user(&ctx.db_pool, "alice").await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            jwt_service: JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()),
        })
    }

    /// The full HTTP application over this harness's pool.
    pub fn app(&self) -> Router {
        let state = AppState::new(
            self.db_pool.clone(),
            JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()),
        );
        build_app(state, &[])
    }

    pub fn token_for(&self, user: &User) -> String {
        self.jwt_service
            .create_token(user.id, &user.username)
            .expect("Failed to create token")
    }

    pub async fn get(&self, uri: &str, user: Option<&User>) -> TestResponse {
        self.send(Method::GET, uri, user, None).await
    }

    /// POST an urlencoded form body.
    pub async fn post_form(&self, uri: &str, user: Option<&User>, body: &str) -> TestResponse {
        self.send(Method::POST, uri, user, Some(body.to_string())).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&User>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(user)),
            );
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            location,
            set_cookie,
            body,
        }
    }
}

/// A collected response: status, redirect target and JSON body.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    pub fn template(&self) -> &str {
        self.body["template"].as_str().unwrap_or_default()
    }

    pub fn context(&self) -> &Value {
        &self.body["context"]
    }

    pub fn listed_ids(&self) -> Vec<String> {
        page_ids(self.context())
    }
}

/// Context of a rendered outcome; panics on a redirect.
pub fn rendered(outcome: &Outcome) -> &Value {
    match outcome {
        Outcome::Render(rendered) => &rendered.context,
        Outcome::Redirect(location) => panic!("expected a render, got redirect to {}", location),
    }
}

/// Ids of the items on a rendered `page_obj`.
pub fn page_ids(context: &Value) -> Vec<String> {
    context["page_obj"]["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Request context for `user`, or an anonymous one.
pub fn request_as(user: Option<&User>, path: &str) -> RequestContext {
    match user {
        Some(user) => RequestContext::authenticated(
            AuthUser {
                user_id: user.id,
                username: user.username.clone(),
            },
            path,
        ),
        None => RequestContext::anonymous(path),
    }
}
