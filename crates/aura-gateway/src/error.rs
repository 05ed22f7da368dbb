//! Gateway runtime error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Runtime errors surfaced by the streak passthrough handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no authenticated subject on request")]
    Unauthenticated,

    #[error("data service unreachable: {0}")]
    DataUnreachable(String),

    #[error("data service returned status {0}")]
    DataStatus(u16),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GatewayError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "no authenticated subject on request".to_string(),
            ),
            GatewayError::DataUnreachable(msg) => (
                StatusCode::BAD_GATEWAY,
                "DATA_SERVICE_UNREACHABLE",
                msg.clone(),
            ),
            GatewayError::DataStatus(status) => (
                StatusCode::BAD_GATEWAY,
                "DATA_SERVICE_ERROR",
                format!("data service returned status {status}"),
            ),
            GatewayError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
