//! Terminal artifact of a benchmark run

use serde::{Deserialize, Serialize};

use crate::runner::TaskResults;

/// Final success/failure state of one run, serialized as a single JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkOutcome {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<TaskResults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl BenchmarkOutcome {
    pub fn success(results: TaskResults) -> Self {
        Self {
            success: true,
            results: Some(results),
            error: None,
            trace: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            error: Some(error.into()),
            trace: None,
        }
    }

    pub fn failure_with_trace(error: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            trace: Some(trace.into()),
            ..Self::failure(error)
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_success_serialization_omits_error_fields() {
        let mut metrics = BTreeMap::new();
        metrics.insert("acc".to_string(), json!(0.5));
        let mut results = TaskResults::new();
        results.insert("arc_easy".to_string(), metrics);

        let outcome = BenchmarkOutcome::success(results);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true, "results": {"arc_easy": {"acc": 0.5}}})
        );
    }

    #[test]
    fn test_failure_serialization() {
        let outcome = BenchmarkOutcome::failure_with_trace("boom", "boom\n\nCaused by: io");
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": false, "error": "boom", "trace": "boom\n\nCaused by: io"})
        );

        let parsed: BenchmarkOutcome =
            serde_json::from_str(r#"{"success": false, "error": "x"}"#).unwrap();
        assert_eq!(parsed, BenchmarkOutcome::failure("x"));
    }
}
