//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine and server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key derivation or size estimation failed on caller-supplied data.
    ///
    /// The engine never catches this itself: a request or response that
    /// cannot be serialized is a caller bug, and the error is handed back
    /// unmodified.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No entry exists for the derived key
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::Serialization(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
