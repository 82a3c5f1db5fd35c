//! API Error Types
//!
//! Errors surfaced by the API client. Transport failures, HTTP status
//! failures and body (de)serialization failures are kept apart so views can
//! decide what to show and the client can decide what to retry.

use thiserror::Error;

/// API client error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (DNS, refused connection, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Backend rejected the credentials (HTTP 401)
    #[error("Not authenticated")]
    Unauthorized,

    /// Any other non-2xx response
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout => true,
            ApiError::Http { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an error from a failed response's status and body text.
    ///
    /// FastAPI-style bodies (`{"detail": "..."}`) contribute their detail
    /// string; anything else is passed through as raw text.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Http { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
