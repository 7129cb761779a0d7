//! Endpoint configuration
//!
//! Describes where the chat-completion service lives and how long a single
//! request may take. Immutable once an adapter has been built from it.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ChatEvalError, ChatEvalResult};

/// Default timeout values for endpoint operations
pub mod timeouts {
    use super::*;

    /// Liveness probe timeout (10 seconds), independent of the request timeout
    pub const HEALTH_PROBE_SECS: u64 = 10;

    /// Default request timeout for grading and generation calls (120 seconds)
    pub const REQUEST_SECS: u64 = 120;

    /// Get liveness probe timeout as Duration
    pub fn health_probe_timeout() -> Duration {
        Duration::from_secs(HEALTH_PROBE_SECS)
    }
}

/// Location and time bound of the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL without a trailing path separator
    base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
}

fn default_timeout() -> u64 {
    timeouts::REQUEST_SECS
}

impl EndpointConfig {
    /// Create a new endpoint config. Trailing `/` characters are stripped.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Per-request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ChatEvalResult<()> {
        if self.base_url.is_empty() {
            return Err(ChatEvalError::config_field(
                "base URL must not be empty",
                "base_url",
            ));
        }

        if self.base_url.ends_with('/') {
            return Err(ChatEvalError::config_field(
                "base URL must not end with a path separator",
                "base_url",
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            ChatEvalError::config_field(
                format!("invalid base URL '{}': {}", self.base_url, e),
                "base_url",
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChatEvalError::config_field(
                format!("unsupported URL scheme '{}'", url.scheme()),
                "base_url",
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ChatEvalError::config_field(
                "timeout must be greater than zero",
                "timeout_secs",
            ));
        }

        Ok(())
    }
}
