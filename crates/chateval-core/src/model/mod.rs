//! Scorable-model capability contract
//!
//! An evaluation harness drives any [`LanguageModel`] through the same fixed
//! surface: capacity metadata, approximate tokenization, likelihood scoring,
//! rolling likelihood, and constrained generation. Results are matched to
//! requests strictly by position, so every batch method returns exactly one
//! output per input, in input order.

mod types;

pub use types::{
    GenerationOptions, GenerationRequest, GenerationResult, LikelihoodRequest, LikelihoodResult,
    RollingRequest,
};

use async_trait::async_trait;

/// Capability set an evaluation harness requires from a pluggable model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// End-of-text marker id
    fn eot_token_id(&self) -> u32;

    /// Maximum context length, in (approximate) tokens
    fn max_length(&self) -> usize;

    /// Maximum generation length, in (approximate) tokens
    fn max_gen_toks(&self) -> usize;

    /// Number of requests the model wants per call
    fn batch_size(&self) -> usize;

    /// Opaque device label
    fn device(&self) -> &str;

    /// Encode text into token ids
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Decode token ids into text
    fn decode(&self, tokens: &[u32]) -> String;

    /// Score each `(context, continuation)` pair.
    async fn estimate_likelihoods(&self, requests: &[LikelihoodRequest]) -> Vec<LikelihoodResult>;

    /// Whole-text likelihood for each request.
    async fn estimate_rolling_likelihood(&self, requests: &[RollingRequest]) -> Vec<f64>;

    /// Generate one completion per request.
    async fn generate(&self, requests: &[GenerationRequest]) -> Vec<GenerationResult>;
}
