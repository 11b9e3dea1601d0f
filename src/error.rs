//! Error types for the dictionary store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for store operations and their HTTP/CLI callers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Word is not present in the store
    #[error("word '{0}' not found")]
    NotFound(String),

    /// Remote store unreachable, timed out, or returned undecodable data
    #[error("Backend error: {0}")]
    Backend(String),

    /// Input rejected before reaching the store
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Missing or wrong Authorization header
    #[error("Unauthorized")]
    Unauthorized,

    /// Loading or saving the persistence document failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns true for the absence case, which callers render as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Backend(format!("serialization failed: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::Backend(_) | StoreError::Persistence(_) | StoreError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the dictionary store.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (StoreError::NotFound("word".to_string()), StatusCode::NOT_FOUND),
            (StoreError::Validation("bad".to_string()), StatusCode::BAD_REQUEST),
            (StoreError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                StoreError::Backend("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Internal("error".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound("apple".to_string());
        assert_eq!(err.to_string(), "word 'apple' not found");
        assert!(err.is_not_found());
        assert!(!StoreError::Backend("x".to_string()).is_not_found());
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = StoreError::NotFound("pear".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "word 'pear' not found");
    }
}
