//! JSON rendering of the run outcome

use anyhow::Result;

use crate::outcome::BenchmarkOutcome;

/// Pretty-printed outcome document
pub fn render_json(outcome: &BenchmarkOutcome) -> Result<String> {
    let json = serde_json::to_string_pretty(outcome)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::TaskResults;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    #[test]
    fn test_render_success() {
        let mut metrics = BTreeMap::new();
        metrics.insert("acc".to_string(), json!(0.25));
        let mut results = TaskResults::new();
        results.insert("hellaswag".to_string(), metrics);

        let rendered = render_json(&BenchmarkOutcome::success(results)).unwrap();
        assert!(rendered.contains('\n'));

        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["results"]["hellaswag"]["acc"], json!(0.25));
    }

    #[test]
    fn test_render_failure() {
        let rendered = render_json(&BenchmarkOutcome::failure("api_url is required")).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": "api_url is required"})
        );
    }
}
