//! HTTP-level tests driving the full router with `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use blog_core::common::urls;
use blog_core::domains::auth::User;
use blog_core::domains::comments::Comment;
use blog_core::domains::posts::PostQuery;
use blog_core::server::middleware::SESSION_COOKIE;
use chrono::Utc;
use common::{fixtures, TestHarness};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn test_health_reports_database(ctx: &TestHarness) {
    let response = ctx.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"]["status"], "ok");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unknown_paths_render_404(ctx: &TestHarness) {
    let response = ctx.get("/no/such/page/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.template(), "pages/404.html");

    let response = ctx.get("/posts/not-a-uuid/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx.get("/category/does-not-exist/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx.get("/profile/nobody_at_all/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_index_renders_first_page(ctx: &TestHarness) {
    let response = ctx.get("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.template(), "blog/index.html");
    assert_eq!(response.context()["page_obj"]["number"], 1);

    let response = ctx.get("/?page=abc", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_anonymous_create_redirects_to_login(ctx: &TestHarness) {
    let response = ctx.get("/posts/create/", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(urls::login("/posts/create/").as_str())
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_author_creates_post_through_form(ctx: &TestHarness) {
    let author = fixtures::create_user(&ctx.db_pool, "author").await.unwrap();
    let category = fixtures::create_category(&ctx.db_pool, "forms", true)
        .await
        .unwrap();

    let form = ctx.get("/posts/create/", Some(&author)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.template(), "blog/create.html");

    let body = format!(
        "title=Hello&text=World&pub_date=2020-01-01T10%3A00&category={}&location=&is_published=on",
        category.id
    );
    let response = ctx.post_form("/posts/create/", Some(&author), &body).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(urls::profile(&author.username).as_str())
    );

    let posts = PostQuery::visible(Utc::now())
        .by_author(author.id)
        .fetch(blog_core::common::Window { limit: 10, offset: 0 }, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.title, "Hello");
    assert_eq!(posts[0].author_username, author.username);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_comment_round_trip_over_http(ctx: &TestHarness) {
    let author = fixtures::create_user(&ctx.db_pool, "author").await.unwrap();
    let reader = fixtures::create_user(&ctx.db_pool, "reader").await.unwrap();
    let category = fixtures::create_category(&ctx.db_pool, "http", true)
        .await
        .unwrap();
    let post = fixtures::create_post(&ctx.db_pool, &author, &category, "Open thread")
        .await
        .unwrap();
    let comment_path = format!("/posts/{}/comment/", post.id);

    let response = ctx.post_form(&comment_path, None, "text=hi").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response
        .location
        .as_deref()
        .unwrap_or_default()
        .starts_with("/auth/login/"));

    let response = ctx.post_form(&comment_path, Some(&reader), "text=Nice+post").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(urls::post_detail(post.id).as_str())
    );

    let detail = ctx.get(&urls::post_detail(post.id), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.context()["post"]["comment_count"], 1);
    let comments = &detail.context()["page_obj"]["items"];
    assert_eq!(comments[0]["text"], "Nice post");
    assert_eq!(comments[0]["author_username"], reader.username.as_str());

    let blank = ctx.post_form(&comment_path, Some(&reader), "text=+++").await;
    assert_eq!(blank.status, StatusCode::OK);
    assert_eq!(blank.template(), "blog/comment.html");
    assert_eq!(Comment::count_for_post(post.id, &ctx.db_pool).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_non_owner_edit_redirects_over_http(ctx: &TestHarness) {
    let author = fixtures::create_user(&ctx.db_pool, "author").await.unwrap();
    let intruder = fixtures::create_user(&ctx.db_pool, "intruder").await.unwrap();
    let category = fixtures::create_category(&ctx.db_pool, "http", true)
        .await
        .unwrap();
    let post = fixtures::create_post(&ctx.db_pool, &author, &category, "Mine")
        .await
        .unwrap();

    let response = ctx
        .post_form(&format!("/posts/{}/delete/", post.id), Some(&intruder), "")
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(urls::post_detail(post.id).as_str())
    );
    assert!(blog_core::domains::posts::Post::find_by_id(post.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_register_then_login_sets_session_cookie(ctx: &TestHarness) {
    let username = fixtures::unique("newcomer");

    let response = ctx
        .post_form(
            "/auth/registration/",
            None,
            &format!("username={}&password1=longenough&password2=longenough", username),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
    assert!(User::find_by_username(&username, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());

    let duplicate = ctx
        .post_form(
            "/auth/registration/",
            None,
            &format!("username={}&password1=longenough&password2=longenough", username),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::OK);
    assert!(duplicate.context()["errors"]["username"].is_array());

    let rejected = ctx
        .post_form(
            "/auth/login/",
            None,
            &format!("username={}&password=wrong-password", username),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.template(), "registration/login.html");
    assert!(rejected.set_cookie.is_none());

    let response = ctx
        .post_form(
            "/auth/login/",
            None,
            &format!("username={}&password=longenough&next=%2Fpages%2Fabout%2F", username),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/pages/about/"));
    let cookie = response.set_cookie.unwrap_or_default();
    assert!(cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(cookie.contains("HttpOnly"));

    let logout = ctx.get("/auth/logout/", None).await;
    assert_eq!(logout.template(), "registration/logged_out.html");
    assert!(logout.set_cookie.unwrap_or_default().contains("Max-Age=0"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_static_pages(ctx: &TestHarness) {
    assert_eq!(ctx.get("/pages/about/", None).await.template(), "pages/about.html");
    assert_eq!(ctx.get("/pages/rules/", None).await.template(), "pages/rules.html");
}
