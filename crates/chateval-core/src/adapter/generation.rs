//! Free-form generation

use super::{ApiModel, MAX_GEN_TOKS};
use crate::error::ChatEvalResult;
use crate::llm::{ChatCompletionRequest, ChatMessage};
use crate::model::GenerationRequest;

const DEFAULT_TEMPERATURE: f32 = 0.0;

impl ApiModel {
    pub(super) async fn complete_generation(
        &self,
        request: &GenerationRequest,
    ) -> ChatEvalResult<String> {
        let options = &request.options;
        let chat_request = ChatCompletionRequest::new(
            vec![ChatMessage::user(request.context.as_str())],
            options.max_tokens.unwrap_or(MAX_GEN_TOKS as u32),
            options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        );

        let text = self.client.complete(&chat_request).await?;
        Ok(cut_at_stop(&text, &options.stop_sequences).to_string())
    }
}

/// Truncate `text` at the earliest occurrence of any stop sequence.
pub(super) fn cut_at_stop<'a>(text: &'a str, stop_sequences: &[String]) -> &'a str {
    let end = stop_sequences
        .iter()
        .filter(|stop| !stop.is_empty())
        .filter_map(|stop| text.find(stop.as_str()))
        .min()
        .unwrap_or(text.len());
    &text[..end]
}
