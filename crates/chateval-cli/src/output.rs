//! Output routing
//!
//! stdout carries exactly one JSON document. Human-readable text goes to the
//! diagnostic sink.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chateval_eval::BenchmarkOutcome;
use chateval_eval::report::render_json;
use clap::ValueEnum;
use serde_json::json;

/// Destination for progress and summary text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagnosticSink {
    #[default]
    Stderr,
    Stdout,
    /// Discard
    None,
}

impl DiagnosticSink {
    pub fn write(&self, text: &str) {
        match self {
            DiagnosticSink::Stderr => eprint!("{}", text),
            DiagnosticSink::Stdout => print!("{}", text),
            DiagnosticSink::None => {}
        }
    }

    pub fn line(&self, text: &str) {
        self.write(&format!("{}\n", text));
    }
}

/// The exact bytes written to stdout and to the output file
pub fn outcome_document(outcome: &BenchmarkOutcome) -> String {
    let json = render_json(outcome).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize outcome");
        json!({
            "success": false,
            "error": format!("Failed to serialize outcome: {}", e),
        })
        .to_string()
    });
    format!("{}\n", json)
}

/// Print the outcome to stdout, copy it to `output_file`, and return the
/// process exit status.
pub async fn emit_outcome(outcome: &BenchmarkOutcome, output_file: Option<&Path>) -> i32 {
    let document = outcome_document(outcome);
    let mut exit_code = outcome.exit_code();

    if let Err(e) = write_stdout(&document) {
        tracing::error!(error = %e, "Failed to write outcome to stdout");
        exit_code = 1;
    }

    if let Some(path) = output_file {
        match write_output_file(path, &document).await {
            Ok(()) => tracing::info!(path = %path.display(), "Results saved"),
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "Failed to save results"
                );
                exit_code = 1;
            }
        }
    }

    exit_code
}

/// Output file for a command line that clap rejected: the last `--output`
/// value among `args`, else `env_output`.
pub fn fallback_output_path<I>(args: I, env_output: Option<OsString>) -> Option<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    let mut found = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let Some(arg) = arg.to_str() else { continue };
        if arg == "--" {
            break;
        }
        if arg == "--output" {
            found = args.next().or(found);
        } else if let Some(value) = arg.strip_prefix("--output=") {
            found = Some(OsString::from(value));
        }
    }

    found.or(env_output).filter(|p| !p.is_empty()).map(PathBuf::from)
}

fn write_stdout(document: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()
}

/// Write `document` to `path`, creating missing parent directories
pub async fn write_output_file(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("Failed to write results file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_outcome_document_is_single_json_value() {
        let document = outcome_document(&BenchmarkOutcome::failure("api_url is required"));
        assert!(document.ends_with("}\n"));

        let value: Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("api_url is required"));
    }

    #[tokio::test]
    async fn test_output_file_matches_stdout_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/results.json");
        let outcome = BenchmarkOutcome::failure("boom");

        let code = emit_outcome(&outcome, Some(&path)).await;
        assert_eq!(code, 1);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, outcome_document(&outcome));
    }

    #[tokio::test]
    async fn test_unwritable_output_file_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let outcome = BenchmarkOutcome::success(Default::default());
        assert_eq!(emit_outcome(&outcome, None).await, 0);
        assert_eq!(
            emit_outcome(&outcome, Some(&blocker.join("results.json"))).await,
            1
        );
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_fallback_output_path() {
        assert_eq!(
            fallback_output_path(os_args(&["--samples", "x", "--output", "a.json"]), None),
            Some(PathBuf::from("a.json"))
        );
        assert_eq!(
            fallback_output_path(os_args(&["--output=b.json", "--bogus"]), Some("env.json".into())),
            Some(PathBuf::from("b.json"))
        );
        assert_eq!(
            fallback_output_path(os_args(&["--bogus"]), Some("env.json".into())),
            Some(PathBuf::from("env.json"))
        );
        assert_eq!(fallback_output_path(os_args(&["--output"]), None), None);
        assert_eq!(fallback_output_path(os_args(&["--", "--output", "c.json"]), None), None);
    }

    #[test]
    fn test_sink_names() {
        assert_eq!(
            DiagnosticSink::from_str("stdout", true).unwrap(),
            DiagnosticSink::Stdout
        );
        assert_eq!(
            DiagnosticSink::from_str("none", true).unwrap(),
            DiagnosticSink::None
        );
    }
}
