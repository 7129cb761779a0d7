//! ChatEval Benchmark Orchestration
//!
//! Drives an evaluation entry point with a chat endpoint plugged in as the
//! model and folds the result into a single JSON outcome.
//!
//! # Example
//!
//! ```rust,ignore
//! use chateval_eval::{BenchmarkRun, BenchmarkRunner, TaskLoader, TaskSuiteEvaluator};
//!
//! let run = BenchmarkRun::new("http://localhost:8000").with_sample_limit(10);
//! let runner = BenchmarkRunner::new(TaskSuiteEvaluator::new(TaskLoader::new(&run.tasks_dir)));
//! let outcome = runner.run(&run).await;
//! std::process::exit(outcome.exit_code());
//! ```

pub mod outcome;
pub mod report;
pub mod runner;
pub mod tasks;

// Re-exports for convenience
pub use outcome::BenchmarkOutcome;
pub use runner::{
    BenchmarkRun, BenchmarkRunner, DEFAULT_TASKS, EvaluationRequest, Evaluator, ProgressCallback,
    RunProgress, TaskResults,
};
pub use tasks::{Task, TaskDocument, TaskKind, TaskLoader, TaskSuiteEvaluator};
