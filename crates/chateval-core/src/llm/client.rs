//! HTTP client for the chat-completion endpoint family

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use super::error_utils::{handle_http_error, handle_transport_error};
use super::messages::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::EndpointConfig;
use crate::error::{ChatEvalError, ChatEvalResult};

const HEALTH_PATH: &str = "health";
const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// Thin wrapper over `reqwest::Client` bound to one endpoint
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: EndpointConfig,
    http_client: Client,
}

impl ChatClient {
    /// Create a client with its own connection pool
    pub fn new(config: EndpointConfig) -> ChatEvalResult<Self> {
        let http_client = Client::builder().build().map_err(|e| {
            ChatEvalError::config(format!("Failed to create HTTP client: {}", e))
        })?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create a client over an existing `reqwest::Client`
    pub fn with_client(config: EndpointConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// `GET {base_url}/health`, returning whatever JSON body the server sends
    #[instrument(skip(self), level = "debug")]
    pub async fn health(&self, timeout: Duration) -> ChatEvalResult<Value> {
        let url = self.config.endpoint(HEALTH_PATH);

        let response = self
            .http_client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| handle_transport_error(e, timeout.as_secs()))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ChatEvalError::json(format!("Failed to parse health response: {}", e)))
    }

    /// `POST {base_url}/v1/chat/completions` with the configured request
    /// timeout, returning the first choice's message content.
    #[instrument(skip(self, request), level = "debug")]
    pub async fn complete(&self, request: &ChatCompletionRequest) -> ChatEvalResult<String> {
        let url = self.config.endpoint(CHAT_COMPLETIONS_PATH);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .timeout(self.config.request_timeout())
            .send()
            .await
            .map_err(|e| handle_transport_error(e, self.config.timeout_secs()))?;

        if !response.status().is_success() {
            return Err(handle_http_error(response).await);
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                handle_transport_error(e, self.config.timeout_secs())
            } else {
                ChatEvalError::json(format!("Failed to parse completion response: {}", e))
            }
        })?;

        body.first_content()
            .map(str::to_string)
            .ok_or_else(|| ChatEvalError::invalid_response("completion response has no choices"))
    }
}
