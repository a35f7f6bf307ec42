use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    db::QueryExecutor, error::AppError, models::QueryResult, queries::NamedQuery, AppState,
};

pub mod analytics;
pub mod health;
pub mod index;
pub mod stats;

/// Every route the dashboard serves. All read-only, all GET.
pub fn router(state: AppState) -> Router {
    // Very permissive CORS so the page can be opened from another host
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health))
        .route("/api/user-spending", get(analytics::user_spending))
        .route("/api/rfm-analysis", get(analytics::rfm_analysis))
        .route("/api/sustainability", get(analytics::sustainability))
        .route("/api/cohort", get(analytics::cohort))
        .route("/api/stats", get(stats::get_stats))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// Common execution path: run, then flag drift from the declared shape
pub async fn run_named(
    executor: &dyn QueryExecutor,
    query: &NamedQuery,
    args: &[String],
) -> Result<QueryResult, AppError> {
    let result = executor.execute(query.sql, args).await?;

    if !result.columns.iter().map(String::as_str).eq(query.columns.iter().copied()) {
        tracing::warn!(
            query = query.name,
            expected = ?query.columns,
            actual = ?result.columns,
            "column list differs from declaration"
        );
    }
    if let Some(cap) = query.row_cap {
        if result.rows.len() > cap {
            tracing::warn!(query = query.name, cap, rows = result.rows.len(), "row cap exceeded");
        }
    }

    tracing::debug!(query = query.name, rows = result.rows.len(), "query executed");
    Ok(result)
}
