//! From trait implementations for ChatEvalError conversions

use super::types::ChatEvalError;

impl From<reqwest::Error> for ChatEvalError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
        }
    }
}
