//! Request and result types exchanged with the harness

use serde::{Deserialize, Serialize};

/// One scoring query: how plausible is `continuation` as the answer to `context`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikelihoodRequest {
    pub context: String,
    pub continuation: String,
}

impl LikelihoodRequest {
    pub fn new(context: impl Into<String>, continuation: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            continuation: continuation.into(),
        }
    }
}

/// Bounded log-likelihood proxy for one [`LikelihoodRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodResult {
    /// More negative means less likely
    pub score: f64,
    /// Whether this continuation is the one the model prefers
    pub is_greedy_match: bool,
}

impl LikelihoodResult {
    pub fn new(score: f64, is_greedy_match: bool) -> Self {
        Self {
            score,
            is_greedy_match,
        }
    }
}

/// Whole-text likelihood query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingRequest {
    pub text: String,
}

impl RollingRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Generation parameters supplied by the harness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default, alias = "max_gen_toks", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, alias = "until", skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl GenerationOptions {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }
}

/// One generation query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub context: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(context: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            context: context.into(),
            options,
        }
    }
}

/// Generated text; empty when the call failed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
