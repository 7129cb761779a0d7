//! Core error type for ChatEval

use thiserror::Error;

/// Result type alias for ChatEval operations
pub type ChatEvalResult<T> = Result<T, ChatEvalError>;

/// Main error type for ChatEval
#[derive(Error, Debug, Clone)]
pub enum ChatEvalError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
    },

    /// HTTP transport or status errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Request exceeded its time bound
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64, url: Option<String> },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Response decoded but did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

}

impl ChatEvalError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CHATEVAL_CONFIG",
            Self::Http { .. } => "CHATEVAL_HTTP",
            Self::Timeout { .. } => "CHATEVAL_TIMEOUT",
            Self::Json { .. } => "CHATEVAL_JSON",
            Self::InvalidResponse { .. } => "CHATEVAL_INVALID_RESPONSE",
        }
    }

    /// HTTP status attached to this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
