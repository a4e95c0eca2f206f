//! Static pages.

use serde_json::json;

use crate::common::Outcome;

pub fn about() -> Outcome {
    Outcome::render("pages/about.html", json!({}))
}

pub fn rules() -> Outcome {
    Outcome::render("pages/rules.html", json!({}))
}
