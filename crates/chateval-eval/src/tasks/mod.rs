//! Local benchmark task suite
//!
//! Tasks are JSONL files on disk; [`TaskSuiteEvaluator`] scores them through
//! any [`chateval_core::LanguageModel`].

mod document;
mod loader;
mod metrics;
mod suite;

pub use document::{Task, TaskDocument, TaskKind};
pub use loader::TaskLoader;
pub use suite::TaskSuiteEvaluator;
