//! # Record Errors
//!
//! Error types for record operations and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::sheets::SheetError;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record errors
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Status outside the allowed set
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    /// Required request fields absent or empty
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// Body is not JSON of the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No record with this id
    #[error("Record not found: {0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Spreadsheet call failed
    #[error("Backend failure: {0}")]
    Backend(#[from] SheetError),

    /// Anything else that went wrong on our side
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecordError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            RecordError::MissingFields(_) => StatusCode::BAD_REQUEST,
            RecordError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            RecordError::NotFound(_) => StatusCode::NOT_FOUND,

            RecordError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RecordError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients; server-side detail stays in the logs
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&RecordError> for ErrorResponse {
    fn from(err: &RecordError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.public_message(),
        }
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            let kind = match &self {
                RecordError::Backend(e) => e.kind(),
                _ => "internal",
            };
            Logger::error(
                "BACKEND_FAILURE",
                &[("kind", kind), ("detail", self.to_string().as_str())],
            );
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RecordError::InvalidStatus("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RecordError::MissingFields("name".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RecordError::NotFound("9".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RecordError::Backend(SheetError::Unavailable("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = RecordError::Backend(SheetError::TokenExchange("secret detail".to_string()));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, 500);
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn test_client_errors_keep_detail() {
        let err = RecordError::InvalidStatus("Busy".to_string());
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, 400);
        assert_eq!(body.error, "Invalid status value: Busy");
    }
}
