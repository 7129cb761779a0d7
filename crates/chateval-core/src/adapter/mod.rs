//! Chat-endpoint adapter
//!
//! [`ApiModel`] presents a plain chat-completion endpoint as a
//! [`LanguageModel`]. It has no notion of tokens or log-probabilities:
//!
//! - tokenization is a length estimate (one id per four characters),
//! - likelihoods come from a deterministic YES/NO grading call mapped onto a
//!   [`GradingScale`],
//! - rolling likelihood is a constant,
//! - generation forwards the context as a single user message.
//!
//! Requests are issued one at a time. A failing item is logged and replaced
//! by a sentinel; the rest of the batch still runs.

mod constructor;
mod generation;
mod grading;
mod likelihood;


pub use grading::GradingScale;

use async_trait::async_trait;
use tracing::warn;

use crate::config::EndpointConfig;
use crate::llm::ChatClient;
use crate::model::{
    GenerationRequest, GenerationResult, LanguageModel, LikelihoodRequest, LikelihoodResult,
    RollingRequest,
};

/// End-of-text marker id reported to the harness
pub const EOT_TOKEN_ID: u32 = 0;
/// Advisory context length used for prompt truncation
pub const MAX_LENGTH: usize = 4096;
/// Advisory generation length, also the default `max_tokens`
pub const MAX_GEN_TOKS: usize = 1024;
/// Requests are issued strictly one at a time
pub const BATCH_SIZE: usize = 1;
/// Device label reported to the harness
pub const DEVICE: &str = "api";
/// Characters per synthetic token
pub const CHARS_PER_TOKEN: usize = 4;
/// Score returned for every rolling-likelihood request
pub const ROLLING_SCORE: f64 = -1.0;

/// Scorable model backed by a chat-completion endpoint
#[derive(Debug, Clone)]
pub struct ApiModel {
    client: ChatClient,
    scale: GradingScale,
}

impl ApiModel {
    pub fn config(&self) -> &EndpointConfig {
        self.client.config()
    }
}

#[async_trait]
impl LanguageModel for ApiModel {
    fn eot_token_id(&self) -> u32 {
        EOT_TOKEN_ID
    }

    fn max_length(&self) -> usize {
        MAX_LENGTH
    }

    fn max_gen_toks(&self) -> usize {
        MAX_GEN_TOKS
    }

    fn batch_size(&self) -> usize {
        BATCH_SIZE
    }

    fn device(&self) -> &str {
        DEVICE
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        let count = text.chars().count() / CHARS_PER_TOKEN;
        (0..count as u32).collect()
    }

    fn decode(&self, _tokens: &[u32]) -> String {
        String::new()
    }

    async fn estimate_likelihoods(&self, requests: &[LikelihoodRequest]) -> Vec<LikelihoodResult> {
        let mut results = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            let result = match self.grade(request).await {
                Ok(affirmed) => self.scale.score(affirmed),
                Err(e) => {
                    warn!(
                        index,
                        code = e.error_code(),
                        status = ?e.status_code(),
                        error = %e,
                        "Likelihood request failed"
                    );
                    self.scale.errored()
                }
            };
            results.push(result);
        }

        results
    }

    async fn estimate_rolling_likelihood(&self, requests: &[RollingRequest]) -> Vec<f64> {
        vec![ROLLING_SCORE; requests.len()]
    }

    async fn generate(&self, requests: &[GenerationRequest]) -> Vec<GenerationResult> {
        let mut results = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            let result = match self.complete_generation(request).await {
                Ok(text) => GenerationResult::new(text),
                Err(e) => {
                    warn!(
                        index,
                        code = e.error_code(),
                        status = ?e.status_code(),
                        error = %e,
                        "Generation request failed"
                    );
                    GenerationResult::empty()
                }
            };
            results.push(result);
        }

        results
    }
}
