//! Path builders for redirects, mirroring the routes in `server::app`.

use std::fmt::Display;

pub fn index() -> String {
    "/".to_string()
}

pub fn post_detail(post_id: impl Display) -> String {
    format!("/posts/{}/", post_id)
}

pub fn category(slug: &str) -> String {
    format!("/category/{}/", slug)
}

pub fn profile(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

pub fn login(next: &str) -> String {
    format!("/auth/login/?next={}", urlencoding::encode(next))
}
