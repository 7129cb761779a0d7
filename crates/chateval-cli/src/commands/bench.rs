//! Benchmark command: resolve settings, run, report

use std::path::Path;

use anyhow::{Context, Result};
use chateval_eval::report::{render_header, render_summary};
use chateval_eval::{
    BenchmarkOutcome, BenchmarkRun, BenchmarkRunner, RunProgress, TaskLoader, TaskSuiteEvaluator,
};

use crate::args::Cli;
use crate::output::{DiagnosticSink, emit_outcome};

/// Run the benchmark described by `cli` and return the process exit status
pub async fn run(cli: &Cli) -> i32 {
    let sink = cli.diagnostics;

    let run = match load_run(cli).await {
        Ok(run) => run,
        Err(e) => return reject(sink, e, cli.output.as_deref()).await,
    };
    if let Err(e) = run.validate().context("Invalid run settings") {
        return reject(sink, e, run.output.as_deref()).await;
    }

    sink.write(&render_header(&run));

    let evaluator = TaskSuiteEvaluator::new(TaskLoader::new(&run.tasks_dir));
    let mut runner = BenchmarkRunner::new(evaluator);
    runner.set_progress_callback(Box::new(move |progress| {
        sink.line(&describe_progress(&progress));
    }));

    let outcome = runner.run(&run).await;

    match (&outcome.results, &outcome.error) {
        (Some(results), _) => sink.write(&render_summary(results)),
        (None, Some(error)) => sink.line(&format!("\nBenchmark failed: {}", error)),
        (None, None) => {}
    }

    emit_outcome(&outcome, run.output.as_deref()).await
}

/// Defaults, then the config file, then environment and flags. The result
/// is not validated yet.
pub async fn load_run(cli: &Cli) -> Result<BenchmarkRun> {
    let base = match &cli.config {
        Some(path) => BenchmarkRun::load(path).await?,
        None => BenchmarkRun::default(),
    };
    Ok(cli.apply_to(base))
}

async fn reject(sink: DiagnosticSink, e: anyhow::Error, output: Option<&Path>) -> i32 {
    let error = format!("Invalid configuration: {:#}", e);
    tracing::error!(error = %error, "Configuration rejected");
    sink.line(&error);
    emit_outcome(&BenchmarkOutcome::failure(error), output).await
}

fn describe_progress(progress: &RunProgress) -> String {
    match progress {
        RunProgress::Initializing { api_url } => {
            format!("Initializing LM adapter for {}...", api_url)
        }
        RunProgress::Evaluating { tasks } => {
            format!("Running evaluation on: {}", tasks.join(", "))
        }
        RunProgress::Completed { elapsed_secs } => {
            format!("Evaluation completed in {:.1}s", elapsed_secs)
        }
        RunProgress::Failed { error } => format!("Evaluation failed: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ENV_LOCK;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["chateval"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    async fn resolve_run(cli: &Cli) -> Result<BenchmarkRun> {
        let run = load_run(cli).await?;
        run.validate().context("Invalid run settings")?;
        Ok(run)
    }

    fn write_config(dir: &Path, body: &str) -> String {
        let config = dir.join("run.toml");
        std::fs::write(&config, body).unwrap();
        config.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_resolve_layers_config_file_under_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "api_url = \"http://from-file:8000\"\nsample_limit = 5\ntasks_dir = \"suite\"\n",
        );

        let run = resolve_run(&parse(&["--config", &config, "--samples", "9"]))
            .await
            .unwrap();
        assert_eq!(run.api_url, "http://from-file:8000");
        assert_eq!(run.sample_limit, 9);
        assert_eq!(run.tasks_dir, PathBuf::from("suite"));
        assert_eq!(run.timeout_secs, 120);
    }

    #[tokio::test]
    async fn test_environment_sits_between_config_file_and_flags() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "api_url = \"http://from-file:8000\"\nsample_limit = 5\n",
        );

        // SAFETY: ENV_LOCK serializes every test that reads or writes CHATEVAL_* vars
        unsafe { std::env::set_var("CHATEVAL_SAMPLES", "7") };
        let from_env = resolve_run(&parse(&["--config", &config])).await;
        let from_flag = resolve_run(&parse(&["--config", &config, "--samples", "9"])).await;
        unsafe { std::env::remove_var("CHATEVAL_SAMPLES") };

        assert_eq!(from_env.unwrap().sample_limit, 7);
        assert_eq!(from_flag.unwrap().sample_limit, 9);
    }

    #[tokio::test]
    async fn test_resolve_rejects_invalid_settings() {
        let err = resolve_run(&parse(&["--api-url", "http://h", "--samples", "0"]))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("sample_limit must be at least 1"));

        assert!(resolve_run(&parse(&["--config", "/nonexistent/run.toml"])).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_configuration_exits_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let output = output.to_str().unwrap().to_string();

        let cli = parse(&[
            "--api-url",
            "http://localhost:8000",
            "--samples",
            "0",
            "--diagnostics",
            "none",
            "--output",
            &output,
        ]);
        assert_eq!(run(&cli).await, 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["success"], serde_json::json!(false));
        assert!(
            written["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid configuration:")
        );
    }

    #[tokio::test]
    async fn test_rejected_config_file_writes_its_own_output() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("reports/out.json");
        let config = write_config(
            dir.path(),
            &format!(
                "api_url = \"http://localhost:8000\"\nsample_limit = 0\noutput = {:?}\n",
                output.to_str().unwrap()
            ),
        );

        let cli = parse(&["--config", &config, "--diagnostics", "none"]);
        assert_eq!(run(&cli).await, 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["success"], serde_json::json!(false));
        assert!(
            written["error"]
                .as_str()
                .unwrap()
                .contains("sample_limit must be at least 1")
        );
    }

    #[test]
    fn test_progress_lines() {
        assert_eq!(
            describe_progress(&RunProgress::Evaluating {
                tasks: vec!["arc_easy".into(), "hellaswag".into()]
            }),
            "Running evaluation on: arc_easy, hellaswag"
        );
        assert_eq!(
            describe_progress(&RunProgress::Completed { elapsed_secs: 2.5 }),
            "Evaluation completed in 2.5s"
        );
    }
}
