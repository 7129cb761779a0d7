//! Benchmark runner components
//!
//! Configuration, the evaluation entry-point contract, and the orchestrator
//! that wires the chat-endpoint adapter into it.

mod config;
mod evaluator;
mod executor;

pub use config::{BenchmarkRun, DEFAULT_TASKS};
pub use evaluator::{EvaluationRequest, Evaluator, TaskResults};
pub use executor::{BenchmarkRunner, ProgressCallback, RunProgress};
