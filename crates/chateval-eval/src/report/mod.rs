//! Human-readable rendering of runs and results
//!
//! The header and summary are diagnostic text. The machine-readable document
//! comes from [`render_json`].

mod json;

pub use json::render_json;

use chrono::Utc;

use crate::runner::{BenchmarkRun, TaskResults};

const RULE_WIDTH: usize = 80;

/// Banner describing the run about to start
pub fn render_header(run: &BenchmarkRun) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:=<width$}\n", "", width = RULE_WIDTH));
    output.push_str("Chat Endpoint Benchmark\n");
    output.push_str(&format!("{:=<width$}\n", "", width = RULE_WIDTH));
    output.push_str(&format!("API URL: {}\n", run.api_url));
    output.push_str(&format!("Samples per task: {}\n", run.sample_limit));
    output.push_str(&format!("Timeout: {}s\n", run.timeout_secs));
    output.push_str(&format!("Tasks: {}\n", run.effective_tasks().join(", ")));
    output.push_str(&format!(
        "Started: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<width$}\n", "", width = RULE_WIDTH));

    output
}

/// Per-task metric listing; values that are not numbers are left out
pub fn render_summary(results: &TaskResults) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<width$}\n", "", width = RULE_WIDTH));
    output.push_str("BENCHMARK RESULTS SUMMARY\n");
    output.push_str(&format!("{:=<width$}\n", "", width = RULE_WIDTH));

    for (task, metrics) in results {
        output.push_str(&format!("\n{}:\n", task.to_uppercase()));
        for (metric, value) in metrics {
            if let Some(number) = value.as_f64() {
                output.push_str(&format!("  {}: {:.4}\n", metric, number));
            }
        }
    }

    output.push_str(&format!("\n{:=<width$}\n", "", width = RULE_WIDTH));
    output
}
