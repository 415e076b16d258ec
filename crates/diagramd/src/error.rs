//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. It implements
//! `axum::response::IntoResponse` to produce JSON error bodies of the shape
//! `{"error": <message>}`, plus an `"info"` diagnostic object for renderer
//! failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The renderer subprocess exited non-zero (400). Carries the diagnostic
    /// parsed from its stderr, or a `{"stderr": ...}` wrapper if unparseable.
    #[error("render failed: {message}")]
    RenderFailed {
        message: String,
        info: serde_json::Value,
    },

    /// The renderer subprocess exceeded its wall-clock budget (504).
    #[error("rendering timed out")]
    RenderTimeout,

    /// The remote model call exceeded its timeout (504).
    #[error("model request timed out")]
    UpstreamTimeout,

    /// The remote model call failed or returned unusable output (502).
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::RenderFailed { message, info } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message, "info": info }),
            ),
            ApiError::RenderTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                serde_json::json!({ "error": "Rendering timed out" }),
            ),
            ApiError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                serde_json::json!({ "error": "model request timed out" }),
            ),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
