// src/routes/analytics.rs

use axum::{extract::State, Json};

use super::run_named;
use crate::{
    error::AppError,
    models::TableResponse,
    queries::{COHORT, RFM_ANALYSIS, SUSTAINABILITY, USER_SPENDING},
    AppState,
};

/// GET /api/user-spending
pub async fn user_spending(
    State(state): State<AppState>,
) -> Result<Json<TableResponse>, AppError> {
    let result = run_named(state.executor.as_ref(), &USER_SPENDING, &[]).await?;
    Ok(Json(result.into_table()))
}

/// GET /api/rfm-analysis
///
/// Recency is measured against the server clock at request time.
pub async fn rfm_analysis(
    State(state): State<AppState>,
) -> Result<Json<TableResponse>, AppError> {
    let now = state.clock.now_sqlite();
    let result = run_named(state.executor.as_ref(), &RFM_ANALYSIS, &[now]).await?;
    Ok(Json(result.into_table()))
}

/// GET /api/sustainability
pub async fn sustainability(
    State(state): State<AppState>,
) -> Result<Json<TableResponse>, AppError> {
    let result = run_named(state.executor.as_ref(), &SUSTAINABILITY, &[]).await?;
    Ok(Json(result.into_table()))
}

/// GET /api/cohort
pub async fn cohort(State(state): State<AppState>) -> Result<Json<TableResponse>, AppError> {
    let result = run_named(state.executor.as_ref(), &COHORT, &[]).await?;
    Ok(Json(result.into_table()))
}
