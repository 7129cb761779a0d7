//! Adapter construction and liveness probe

use reqwest::Client;
use tracing::{info, warn};

use super::{ApiModel, GradingScale};
use crate::config::{EndpointConfig, timeouts};
use crate::error::{ChatEvalError, ChatEvalResult};
use crate::llm::ChatClient;

impl ApiModel {
    /// Build an adapter for `config`.
    ///
    /// Fails only when the configuration is invalid or the HTTP client cannot
    /// be created. The `/health` probe is best effort: an unreachable endpoint
    /// is logged and surfaces later, at call time.
    pub async fn connect(config: EndpointConfig) -> ChatEvalResult<Self> {
        config.validate()?;
        let client = ChatClient::new(config)?;
        Ok(Self::from_client(client).await)
    }

    /// Build an adapter over a caller-supplied `reqwest::Client`
    pub async fn with_client(config: EndpointConfig, http_client: Client) -> ChatEvalResult<Self> {
        config.validate()?;
        let client = ChatClient::with_client(config, http_client);
        Ok(Self::from_client(client).await)
    }

    /// Replace the grading scale. The scale must keep
    /// `errored < rejected < affirmed`.
    pub fn with_scale(mut self, scale: GradingScale) -> ChatEvalResult<Self> {
        if !scale.is_ordered() {
            return Err(ChatEvalError::config_field(
                format!(
                    "grading scale must satisfy errored < rejected < affirmed, got {} / {} / {}",
                    scale.errored_score(),
                    scale.rejected_score(),
                    scale.affirmed_score()
                ),
                "scale",
            ));
        }
        self.scale = scale;
        Ok(self)
    }

    async fn from_client(client: ChatClient) -> Self {
        let model = Self {
            client,
            scale: GradingScale::default(),
        };
        model.probe_health().await;
        model
    }

    async fn probe_health(&self) {
        let base_url = self.config().base_url();
        match self.client.health(timeouts::health_probe_timeout()).await {
            Ok(body) => info!(url = %base_url, health = %body, "Connected to API"),
            Err(e) => warn!(
                url = %base_url,
                error = %e,
                "Health check failed (continuing anyway)"
            ),
        }
    }
}
