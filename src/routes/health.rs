// src/routes/health.rs

use axum::{extract::State, Json};
use serde::Serialize;

use super::run_named;
use crate::{queries::HEALTH_PROBE, AppState};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Reachable,
    Unreachable,
}

#[derive(Serialize)]
pub struct HealthResp {
    /// "ok" when the store answered, "degraded" otherwise.
    pub status: &'static str,
    pub store: StoreStatus,
    pub version: &'static str,
}

/// GET /health
///
/// Always 200 so the process stays up while the store is down; the body says which.
pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let store = match run_named(state.executor.as_ref(), &HEALTH_PROBE, &[]).await {
        Ok(_) => StoreStatus::Reachable,
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            StoreStatus::Unreachable
        }
    };
    let status = match store {
        StoreStatus::Reachable => "ok",
        StoreStatus::Unreachable => "degraded",
    };

    Json(HealthResp { status, store, version: env!("CARGO_PKG_VERSION") })
}
