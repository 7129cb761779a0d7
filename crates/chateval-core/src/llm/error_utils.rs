//! Mapping of endpoint failures onto `ChatEvalError`.

use serde_json::Value;

use crate::error::ChatEvalError;

const MAX_BODY_CHARS: usize = 1_024;

/// Condense a non-success response body into one log-friendly line.
///
/// Serving frameworks wrap the reason as `{"detail": ...}`, `{"error": "..."}`
/// or `{"error": {"message": ...}}`; when one of those is present only the
/// reason is kept. Anything else is passed through with whitespace collapsed.
pub fn summarize_body(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty response body>".to_string();
    }

    let reason = serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|json| error_reason(&json))
        .unwrap_or_else(|| trimmed.to_string());

    cap_length(reason.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn error_reason(json: &Value) -> Option<String> {
    let field = ["detail", "error", "message"]
        .iter()
        .find_map(|key| json.get(key))?;

    match field {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => error_reason(field).or_else(|| Some(field.to_string())),
        other => Some(other.to_string()),
    }
}

fn cap_length(text: String) -> String {
    let char_count = text.chars().count();
    if char_count <= MAX_BODY_CHARS {
        return text;
    }

    let kept: String = text.chars().take(MAX_BODY_CHARS).collect();
    format!("{}... [truncated {} chars]", kept, char_count - MAX_BODY_CHARS)
}

/// Build an error from a non-success HTTP response.
pub async fn handle_http_error(response: reqwest::Response) -> ChatEvalError {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    ChatEvalError::http_status(
        format!("endpoint returned status {}: {}", status, summarize_body(&body)),
        status.as_u16(),
        url,
    )
}

/// Build an error from a transport failure, separating timeouts.
pub fn handle_transport_error(err: reqwest::Error, timeout_secs: u64) -> ChatEvalError {
    if err.is_timeout() {
        ChatEvalError::timeout(timeout_secs, err.url().map(|u| u.to_string()))
    } else {
        ChatEvalError::from(err)
    }
}
