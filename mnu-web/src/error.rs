//! Error types for mnu-web
//!
//! Three kinds of failure reach the HTTP boundary:
//! - validation errors (client-caused, 400, never logged as faults)
//! - notification failures on the contact route (500, diagnostic included)
//! - unexpected internal faults (500, generic body, detail logged only)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mnu_common::FieldErrors;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::notify::NotifyError;
use crate::storage::StorageError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Submission failed schema validation (400)
    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    /// Notification delivery failed and nothing else was accomplished (500)
    #[error("Failed to send message: {0}")]
    Notification(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage fault (500, detail not exposed)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        ApiError::Notification(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "Validation error",
                    "errors": errors,
                }),
            ),
            ApiError::Notification(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "Failed to send message",
                    "error": detail,
                }),
            ),
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({
                    "message": what,
                }),
            ),
            ApiError::Storage(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "message": "Internal server error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
