//! Chat-completion wire types and HTTP client

pub mod client;
pub mod error_utils;
pub mod messages;

pub use client::ChatClient;
pub use messages::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, MessageRole};
