//! Benchmark run configuration
//!
//! One `BenchmarkRun` describes one orchestration invocation and stays fixed
//! for the run's duration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chateval_core::EndpointConfig;
use serde::{Deserialize, Serialize};

/// Tasks evaluated when none are given
pub const DEFAULT_TASKS: [&str; 3] = ["hellaswag", "arc_easy", "truthfulqa_mc2"];

const MAX_API_URL_LEN: usize = 512;

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Base URL of the chat-completion service
    #[serde(default)]
    pub api_url: String,

    /// Maximum documents evaluated per task
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Timeout per request in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Ordered task names (empty = default set)
    #[serde(default)]
    pub tasks: Vec<String>,

    /// Directory holding `<task>.jsonl` files
    #[serde(default = "default_tasks_dir")]
    pub tasks_dir: PathBuf,

    /// File that receives a copy of the JSON outcome
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_sample_limit() -> usize {
    50
}

fn default_timeout() -> u64 {
    120
}

fn default_tasks_dir() -> PathBuf {
    PathBuf::from("tasks")
}

impl Default for BenchmarkRun {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            sample_limit: default_sample_limit(),
            timeout_secs: default_timeout(),
            tasks: Vec::new(),
            tasks_dir: default_tasks_dir(),
            output: None,
        }
    }
}

impl BenchmarkRun {
    /// Create a new run against `api_url` with default settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Load a run from a TOML file, or JSON when the extension is `.json`
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let run = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        Ok(run)
    }

    /// Set the per-task sample cap
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set task names
    pub fn with_tasks(mut self, tasks: Vec<String>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Set task directory
    pub fn with_tasks_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tasks_dir = dir.into();
        self
    }

    /// Set output file
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Task list with the default set substituted when empty
    pub fn effective_tasks(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            DEFAULT_TASKS.iter().map(|t| t.to_string()).collect()
        } else {
            self.tasks.clone()
        }
    }

    /// Endpoint settings handed to the adapter
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig::new(&self.api_url, self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url is required");
        }
        if self.api_url.len() > MAX_API_URL_LEN {
            bail!("api_url must be at most {} characters", MAX_API_URL_LEN);
        }
        if self.sample_limit == 0 {
            bail!("sample_limit must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        if let Some(blank) = self.tasks.iter().position(|t| t.trim().is_empty()) {
            bail!("task name at position {} is empty", blank);
        }
        Ok(())
    }
}
