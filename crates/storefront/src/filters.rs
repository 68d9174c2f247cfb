//! Askama filters shared by the page templates.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Stylesheet fingerprint computed by `build.rs`; empty if `main.css` was
/// missing at build time.
const CSS_HASH: &str = env!("CSS_HASH");

/// Year shown in the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// URL of the site stylesheet: the fingerprinted copy when one was built,
/// otherwise the plain file.
///
/// Usage in templates: `{{ ""|stylesheet_href }}`
#[askama::filter_fn]
pub fn stylesheet_href(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(stylesheet_path(CSS_HASH))
}

fn stylesheet_path(hash: &str) -> String {
    if hash.is_empty() {
        "/static/css/main.css".to_string()
    } else {
        format!("/static/css/derived/main.{hash}.css")
    }
}
