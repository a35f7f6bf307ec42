// src/routes/index.rs

use axum::response::Html;

const DASHBOARD_PAGE: &str = include_str!("../../templates/index.html");

/// GET / — static shell; the page pulls its data from /api/* itself.
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
