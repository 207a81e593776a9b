//! # Sheet Errors
//!
//! Error types for the spreadsheet transport.

use thiserror::Error;

/// Result type for sheet operations
pub type SheetResult<T> = Result<T, SheetError>;

/// Failures talking to the spreadsheet service
#[derive(Debug, Clone, Error)]
pub enum SheetError {
    /// Service-account key file missing or malformed
    #[error("Credentials error ({path}): {reason}")]
    Credentials { path: String, reason: String },

    /// The OAuth token endpoint rejected the assertion or returned garbage
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Non-2xx response from the Sheets API
    #[error("{operation} failed with HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// Connection, TLS, DNS or timeout failure
    #[error("{operation} transport error: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    /// Response body did not have the expected shape
    #[error("{operation} returned an unexpected body: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },

    /// Row index has no corresponding row in the sheet
    #[error("Row index {0} is outside the sheet")]
    RowOutOfRange(usize),

    /// Backend refused the call (in-memory sheet failure injection, poisoned lock)
    #[error("Sheet unavailable: {0}")]
    Unavailable(String),
}

impl SheetError {
    /// Short machine-readable kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SheetError::Credentials { .. } => "credentials",
            SheetError::TokenExchange(_) => "token_exchange",
            SheetError::Status { .. } => "http_status",
            SheetError::Transport { .. } => "transport",
            SheetError::Decode { .. } => "decode",
            SheetError::RowOutOfRange(_) => "row_out_of_range",
            SheetError::Unavailable(_) => "unavailable",
        }
    }

    /// Map a ureq failure for the named operation
    pub(crate) fn from_ureq(operation: &'static str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => SheetError::Status { operation, status },
            ureq::Error::Transport(transport) => SheetError::Transport {
                operation,
                reason: transport.to_string(),
            },
        }
    }
}
