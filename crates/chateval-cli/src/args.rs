//! CLI argument definitions using clap
//!
//! Every run setting is optional here so that unset flags fall through to the
//! environment, then the config file, then built-in defaults.

use std::path::PathBuf;

use chateval_eval::BenchmarkRun;
use clap::{Parser, ValueEnum};

use crate::output::DiagnosticSink;

/// Held by tests that depend on `CHATEVAL_*` environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Log line format on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chateval")]
#[command(about = "Benchmark a chat-completion endpoint on log-likelihood tasks")]
#[command(
    long_about = r#"Benchmark a chat-completion endpoint on log-likelihood tasks

Each answer choice is graded by asking the endpoint a YES/NO question; the
grades stand in for log-likelihoods. The outcome is printed to stdout as a
single JSON document and the exit status is 0 only on success.

EXAMPLES:
  chateval --api-url http://localhost:8000
  chateval --api-url http://localhost:8000 --tasks arc_easy --samples 10
  chateval --config run.toml --output results/run.json"#
)]
#[command(version)]
pub struct Cli {
    /// Base URL of the chat-completion service
    #[arg(long, env = "CHATEVAL_API_URL")]
    pub api_url: Option<String>,

    /// Maximum documents evaluated per task [default: 50]
    #[arg(long, env = "CHATEVAL_SAMPLES")]
    pub samples: Option<usize>,

    /// Per-request timeout in seconds [default: 120]
    #[arg(long, env = "CHATEVAL_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Task names [default: hellaswag arc_easy truthfulqa_mc2]
    #[arg(long, num_args = 1..)]
    pub tasks: Option<Vec<String>>,

    /// Directory holding <task>.jsonl files [default: tasks]
    #[arg(long, env = "CHATEVAL_TASKS_DIR")]
    pub tasks_dir: Option<PathBuf>,

    /// Also write the JSON outcome to this file
    #[arg(long, env = "CHATEVAL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Run settings file (TOML, or JSON with a .json extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where progress and summary text goes
    #[arg(long, value_enum, default_value = "stderr")]
    pub diagnostics: DiagnosticSink,

    /// Enable informational logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Overlay the flags that were given onto `run`
    pub fn apply_to(&self, mut run: BenchmarkRun) -> BenchmarkRun {
        if let Some(api_url) = &self.api_url {
            run.api_url = api_url.clone();
        }
        if let Some(samples) = self.samples {
            run.sample_limit = samples;
        }
        if let Some(timeout) = self.timeout {
            run.timeout_secs = timeout;
        }
        if let Some(tasks) = &self.tasks {
            run.tasks = tasks.clone();
        }
        if let Some(tasks_dir) = &self.tasks_dir {
            run.tasks_dir = tasks_dir.clone();
        }
        if let Some(output) = &self.output {
            run.output = Some(output.clone());
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "chateval",
            "--api-url",
            "http://localhost:8000",
            "--samples",
            "10",
            "--timeout",
            "30",
            "--tasks",
            "arc_easy",
            "hellaswag",
            "--output",
            "out/results.json",
            "--diagnostics",
            "none",
            "--log-format",
            "json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cli.samples, Some(10));
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(
            cli.tasks,
            Some(vec!["arc_easy".to_string(), "hellaswag".to_string()])
        );
        assert_eq!(cli.output, Some(PathBuf::from("out/results.json")));
        assert_eq!(cli.diagnostics, DiagnosticSink::None);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_defaults_leave_settings_unset() {
        let cli = Cli::try_parse_from(["chateval"]).unwrap();
        assert_eq!(cli.diagnostics, DiagnosticSink::Stderr);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.tasks.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["chateval", "--samples", "many"]).is_err());
        assert!(Cli::try_parse_from(["chateval", "--diagnostics", "file"]).is_err());
        assert!(Cli::try_parse_from(["chateval", "--tasks"]).is_err());
    }

    #[test]
    fn test_flags_override_loaded_settings() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let loaded = BenchmarkRun::new("http://from-file:8000")
            .with_sample_limit(5)
            .with_tasks(vec!["wiki".to_string()]);

        let cli = Cli::try_parse_from([
            "chateval",
            "--api-url",
            "http://flag:9000",
            "--timeout",
            "7",
        ])
        .unwrap();
        let run = cli.apply_to(loaded);

        assert_eq!(run.api_url, "http://flag:9000");
        assert_eq!(run.timeout_secs, 7);
        assert_eq!(run.sample_limit, 5);
        assert_eq!(run.tasks, vec!["wiki"]);
    }
}
