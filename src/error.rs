//! Error types for the computation server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failures reported by a remote cache backend.
///
/// These never leave the cache layer: `CacheStore` logs them, counts them
/// and falls back to the in-process map.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Could not establish a connection
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Connect attempt exceeded its deadline
    #[error("Cache operation timed out: {0}")]
    Timeout(String),

    /// A command against a live connection failed
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Result type for remote cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

// == API Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path parameter is not an integer or is out of bounds
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Route does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
