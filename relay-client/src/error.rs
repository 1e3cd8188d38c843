//! Error types for the relay client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the source or target endpoint
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, DNS, timeout, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The client could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}
