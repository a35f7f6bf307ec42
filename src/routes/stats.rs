// src/routes/stats.rs

use axum::{extract::State, Json};
use serde_json::Value;

use super::run_named;
use crate::{
    db::QueryExecutor,
    error::AppError,
    models::StatsResponse,
    queries::{
        NamedQuery, STATS_TOTAL_ORDERS, STATS_TOTAL_PRODUCTS, STATS_TOTAL_REVENUE,
        STATS_TOTAL_USERS,
    },
    AppState,
};

/// GET /api/stats
///
/// Four independent round-trips; the figures are not read in one snapshot.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let executor = state.executor.as_ref();

    let total_users = count(executor, &STATS_TOTAL_USERS).await?;
    let total_orders = count(executor, &STATS_TOTAL_ORDERS).await?;
    let total_revenue = revenue(executor, &STATS_TOTAL_REVENUE).await?;
    let total_products = count(executor, &STATS_TOTAL_PRODUCTS).await?;

    Ok(Json(StatsResponse { total_users, total_orders, total_revenue, total_products }))
}

async fn count(executor: &dyn QueryExecutor, query: &NamedQuery) -> Result<i64, AppError> {
    let result = run_named(executor, query, &[]).await?;
    match result.scalar() {
        Some(v) => v
            .as_i64()
            .ok_or_else(|| AppError::Shape(format!("{}: expected an integer, got {v}", query.name))),
        None => Err(AppError::Shape(format!("{}: no row returned", query.name))),
    }
}

// NULL revenue means nothing paid yet
async fn revenue(executor: &dyn QueryExecutor, query: &NamedQuery) -> Result<f64, AppError> {
    let result = run_named(executor, query, &[]).await?;
    match result.scalar() {
        Some(Value::Null) => Ok(0.0),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| AppError::Shape(format!("{}: expected a number, got {v}", query.name))),
        None => Err(AppError::Shape(format!("{}: no row returned", query.name))),
    }
}
