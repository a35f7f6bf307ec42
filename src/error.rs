// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Request-level failures. Nothing is retried; every variant ends the request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The store could not be opened (missing file, bad URL, locked).
    #[error("store unavailable: {0}")]
    Connectivity(String),

    /// The statement itself failed or a column could not be decoded.
    #[error("query failed: {0}")]
    Query(String),

    /// A scalar query came back without the value the endpoint needs.
    #[error("unexpected result shape: {0}")]
    Shape(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Connectivity(_) => "connectivity",
            AppError::Query(_) => "query",
            AppError::Shape(_) => "shape",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Query(_) | AppError::Shape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "request failed");

        let body = ErrorBody {
            error: ErrorDetail { kind: self.kind(), message: self.to_string() },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connectivity_maps_to_503_with_kind() {
        let resp = AppError::Connectivity("unable to open database file".into()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["kind"], "connectivity");
        assert_eq!(
            json["error"]["message"],
            "store unavailable: unable to open database file"
        );
    }

    #[test]
    fn query_and_shape_map_to_500() {
        assert_eq!(
            AppError::Query("no such table: users".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Shape("no row".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
