//! Evaluation entry point
//!
//! The orchestrator does not know how tasks are scored. It hands a model and
//! an [`EvaluationRequest`] to an [`Evaluator`] and passes the returned
//! [`TaskResults`] through untouched.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chateval_core::LanguageModel;
use serde::{Deserialize, Serialize};

/// Metrics keyed by task name, then metric name
pub type TaskResults = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Parameters for one evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Ordered task names
    pub tasks: Vec<String>,

    /// Solved examples prepended to each prompt
    pub num_fewshot: usize,

    /// Per-task document cap
    pub limit: Option<usize>,

    /// Resampling iterations for error estimates (0 = none)
    pub bootstrap_iters: u32,
}

impl EvaluationRequest {
    /// Zero-shot, single-pass request capped at `limit` documents per task
    pub fn zero_shot(tasks: Vec<String>, limit: usize) -> Self {
        Self {
            tasks,
            num_fewshot: 0,
            limit: Some(limit),
            bootstrap_iters: 0,
        }
    }
}

/// Generic evaluation entry point with a pluggable model
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn simple_evaluate(
        &self,
        model: &dyn LanguageModel,
        request: &EvaluationRequest,
    ) -> Result<TaskResults>;
}
