//! Grading prompt and score mapping

use serde::{Deserialize, Serialize};

use crate::llm::{ChatCompletionRequest, ChatMessage};
use crate::model::{LikelihoodRequest, LikelihoodResult};

/// Grading calls only need the first word of the verdict
pub const GRADING_MAX_TOKENS: u32 = 4;
pub const GRADING_TEMPERATURE: f32 = 0.0;

const GRADING_SYSTEM_PROMPT: &str = "You are a strict binary grader. Reply with 'YES' if the \
     proposed answer is fully correct and directly addresses the question. Reply with 'NO' \
     otherwise. Do not add explanations.";

/// Scores assigned to grading outcomes.
///
/// Only the ordering `errored < rejected < affirmed` matters: when the
/// harness picks the best-scoring option for a question, an affirmed option
/// outranks every rejected one, and an errored option is never preferred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingScale {
    affirmed: f64,
    rejected: f64,
    errored: f64,
}

impl Default for GradingScale {
    fn default() -> Self {
        Self {
            affirmed: 0.0,
            rejected: -20.0,
            errored: -100.0,
        }
    }
}

impl GradingScale {
    pub fn new(affirmed: f64, rejected: f64, errored: f64) -> Self {
        Self {
            affirmed,
            rejected,
            errored,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.errored < self.rejected && self.rejected < self.affirmed
    }

    pub fn affirmed_score(&self) -> f64 {
        self.affirmed
    }

    pub fn rejected_score(&self) -> f64 {
        self.rejected
    }

    pub fn errored_score(&self) -> f64 {
        self.errored
    }

    /// Result for a graded request
    pub fn score(&self, affirmed: bool) -> LikelihoodResult {
        if affirmed {
            LikelihoodResult::new(self.affirmed, true)
        } else {
            LikelihoodResult::new(self.rejected, false)
        }
    }

    /// Result for a request that could not be graded
    pub fn errored(&self) -> LikelihoodResult {
        LikelihoodResult::new(self.errored, false)
    }
}

/// Build the grading call for one likelihood request
pub fn grading_request(request: &LikelihoodRequest) -> ChatCompletionRequest {
    let user_prompt = format!(
        "Question and context:\n{}\n\nProposed answer choice:\n{}\n\n\
         Is this proposed answer fully correct?",
        request.context, request.continuation
    );

    ChatCompletionRequest::new(
        vec![
            ChatMessage::system(GRADING_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ],
        GRADING_MAX_TOKENS,
        GRADING_TEMPERATURE,
    )
}

/// Whether the grader's reply affirms the answer
pub fn is_affirmed(reply: &str) -> bool {
    reply.trim().to_uppercase().starts_with("YES")
}
