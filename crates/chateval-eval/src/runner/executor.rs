//! Benchmark orchestrator
//!
//! Builds the chat-endpoint adapter, hands it to the evaluation entry point,
//! and folds whatever happens into a [`BenchmarkOutcome`]. Nothing is retried
//! here: per-item failures are already absorbed inside the adapter, so an
//! error that reaches this level ends the run.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use chateval_core::ApiModel;
use futures::FutureExt;

use super::{BenchmarkRun, EvaluationRequest, Evaluator};
use crate::outcome::BenchmarkOutcome;

/// Callback for progress updates during a run
pub type ProgressCallback = Box<dyn Fn(RunProgress) + Send + Sync>;

/// Progress update during a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunProgress {
    /// Adapter is being built
    Initializing { api_url: String },
    /// Evaluation entry point has been invoked
    Evaluating { tasks: Vec<String> },
    /// Evaluation returned results
    Completed { elapsed_secs: f64 },
    /// Run ended without results
    Failed { error: String },
}

/// Orchestrator for a single benchmark run
pub struct BenchmarkRunner<E> {
    evaluator: E,
    progress_callback: Option<ProgressCallback>,
}

impl<E: Evaluator> BenchmarkRunner<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            progress_callback: None,
        }
    }

    /// Set progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    /// Run the configured tasks and return the outcome. Never fails: every
    /// error is reported inside the outcome.
    pub async fn run(&self, config: &BenchmarkRun) -> BenchmarkOutcome {
        let tasks = config.effective_tasks();

        self.emit_progress(RunProgress::Initializing {
            api_url: config.api_url.clone(),
        });

        let model = match ApiModel::connect(config.endpoint_config()).await {
            Ok(model) => model,
            Err(e) => {
                let error = format!("Failed to initialize LM adapter: {}", e);
                tracing::error!(error = %e, "Adapter initialization failed");
                self.emit_progress(RunProgress::Failed {
                    error: error.clone(),
                });
                return BenchmarkOutcome::failure(error);
            }
        };

        self.emit_progress(RunProgress::Evaluating {
            tasks: tasks.clone(),
        });

        let request = EvaluationRequest::zero_shot(tasks, config.sample_limit);
        let start_time = Instant::now();

        let evaluation = AssertUnwindSafe(self.evaluator.simple_evaluate(&model, &request))
            .catch_unwind()
            .await;

        match evaluation {
            Ok(Ok(results)) => {
                let elapsed_secs = start_time.elapsed().as_secs_f64();
                tracing::info!(
                    tasks = results.len(),
                    elapsed_secs,
                    "Evaluation completed"
                );
                self.emit_progress(RunProgress::Completed { elapsed_secs });
                BenchmarkOutcome::success(results)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Evaluation failed");
                self.emit_progress(RunProgress::Failed {
                    error: e.to_string(),
                });
                BenchmarkOutcome::failure_with_trace(e.to_string(), format!("{:?}", e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(error = %message, "Evaluation panicked");
                self.emit_progress(RunProgress::Failed {
                    error: message.clone(),
                });
                let trace = format!("evaluation panicked: {}", message);
                BenchmarkOutcome::failure_with_trace(message, trace)
            }
        }
    }

    /// Emit progress update
    fn emit_progress(&self, progress: RunProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::TaskResults;
    use anyhow::{Context, Result, anyhow};
    use async_trait::async_trait;
    use chateval_core::LanguageModel;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    struct FixedEvaluator {
        results: TaskResults,
        seen: Arc<Mutex<Vec<(EvaluationRequest, String)>>>,
    }

    #[async_trait]
    impl Evaluator for FixedEvaluator {
        async fn simple_evaluate(
            &self,
            model: &dyn LanguageModel,
            request: &EvaluationRequest,
        ) -> Result<TaskResults> {
            self.seen
                .lock()
                .unwrap()
                .push((request.clone(), model.device().to_string()));
            Ok(self.results.clone())
        }
    }

    struct FailingEvaluator;

    #[async_trait]
    impl Evaluator for FailingEvaluator {
        async fn simple_evaluate(
            &self,
            _model: &dyn LanguageModel,
            _request: &EvaluationRequest,
        ) -> Result<TaskResults> {
            Err(anyhow!("malformed task definition")).context("Failed to load task 'broken'")
        }
    }

    struct PanickingEvaluator;

    #[async_trait]
    impl Evaluator for PanickingEvaluator {
        async fn simple_evaluate(
            &self,
            _model: &dyn LanguageModel,
            _request: &EvaluationRequest,
        ) -> Result<TaskResults> {
            panic!("metric exploded");
        }
    }

    fn sample_results() -> TaskResults {
        let mut arc = BTreeMap::new();
        arc.insert("acc".to_string(), json!(0.72));
        arc.insert("alias".to_string(), json!("arc_easy"));
        let mut results = TaskResults::new();
        results.insert("arc_easy".to_string(), arc);
        results
    }

    fn unreachable_run() -> BenchmarkRun {
        BenchmarkRun::new("http://127.0.0.1:1").with_timeout(1)
    }

    #[tokio::test]
    async fn test_success_passes_results_through() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let runner = BenchmarkRunner::new(FixedEvaluator {
            results: sample_results(),
            seen: seen.clone(),
        });

        let outcome = runner
            .run(&unreachable_run().with_sample_limit(7).with_tasks(vec!["arc_easy".into()]))
            .await;

        assert_eq!(outcome, BenchmarkOutcome::success(sample_results()));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (request, device) = &seen[0];
        assert_eq!(request.tasks, vec!["arc_easy"]);
        assert_eq!(request.limit, Some(7));
        assert_eq!(request.num_fewshot, 0);
        assert_eq!(request.bootstrap_iters, 0);
        assert_eq!(device, "api");
    }

    #[tokio::test]
    async fn test_default_task_set_used_when_empty() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let runner = BenchmarkRunner::new(FixedEvaluator {
            results: TaskResults::new(),
            seen: seen.clone(),
        });

        let outcome = runner.run(&unreachable_run()).await;
        assert!(outcome.success);
        assert_eq!(
            seen.lock().unwrap()[0].0.tasks,
            vec!["hellaswag", "arc_easy", "truthfulqa_mc2"]
        );
    }

    #[tokio::test]
    async fn test_evaluation_failure_captures_error_and_trace() {
        let runner = BenchmarkRunner::new(FailingEvaluator);
        let outcome = runner.run(&unreachable_run()).await;

        assert!(!outcome.success);
        assert!(outcome.results.is_none());
        assert_eq!(outcome.error.as_deref(), Some("Failed to load task 'broken'"));
        let trace = outcome.trace.expect("trace");
        assert!(trace.contains("Failed to load task 'broken'"));
        assert!(trace.contains("malformed task definition"));
    }

    #[tokio::test]
    async fn test_evaluation_panic_becomes_failure() {
        let runner = BenchmarkRunner::new(PanickingEvaluator);
        let outcome = runner.run(&unreachable_run()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("metric exploded"));
        assert!(!outcome.trace.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_adapter_initialization_failure_is_fatal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let runner = BenchmarkRunner::new(FixedEvaluator {
            results: sample_results(),
            seen: seen.clone(),
        });

        let outcome = runner.run(&BenchmarkRun::new("not a url")).await;

        assert!(!outcome.success);
        assert!(
            outcome
                .error
                .as_deref()
                .unwrap()
                .starts_with("Failed to initialize LM adapter: ")
        );
        assert!(outcome.trace.is_none());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let mut runner = BenchmarkRunner::new(FailingEvaluator);
        runner.set_progress_callback(Box::new(move |p| sink.lock().unwrap().push(p)));

        runner
            .run(&unreachable_run().with_tasks(vec!["broken".into()]))
            .await;

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RunProgress::Initializing { .. }));
        assert_eq!(
            events[1],
            RunProgress::Evaluating {
                tasks: vec!["broken".to_string()]
            }
        );
        assert!(matches!(events[2], RunProgress::Failed { .. }));
    }
}
