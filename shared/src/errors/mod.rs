//! Shared error types and response structures

use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error title for client identification
    pub error: String,

    /// Human-readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }

    /// Create an error response with no message body
    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

/// Error titles used across the application
///
/// These are wire-visible strings; existing consumers match on them, so
/// changing one is a breaking API change.
pub mod error_codes {
    pub const BAD_REQUEST: &str = "Bad Request";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const RATE_LIMIT_EXCEEDED: &str = "Rate Limit Exceeded";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
    pub const INVALID_OR_EXPIRED_CODE: &str = "Invalid or Expired Code";
    pub const INVALID_CODE: &str = "Invalid Code";
    pub const INVALID_OR_EXPIRED_TOKEN: &str = "Invalid or Expired Token";
    pub const EXPIRED_TOKEN: &str = "Expired Token";
    pub const NO_ACTIVE_TOKEN: &str = "No Active Token";
    pub const NOT_FOUND: &str = "Not Found";
}
