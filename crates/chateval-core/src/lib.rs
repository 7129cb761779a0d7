//! ChatEval Core Library
//!
//! Presents a plain chat-completion HTTP endpoint as a scorable model that a
//! log-likelihood benchmark harness can drive.

pub mod adapter;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;

// Re-export commonly used types
pub use adapter::{ApiModel, GradingScale};
pub use config::EndpointConfig;
pub use error::{ChatEvalError, ChatEvalResult};
pub use model::{
    GenerationOptions, GenerationRequest, GenerationResult, LanguageModel, LikelihoodRequest,
    LikelihoodResult, RollingRequest,
};
