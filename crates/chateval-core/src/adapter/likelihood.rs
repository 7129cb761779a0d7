//! Likelihood estimation through grading calls

use super::ApiModel;
use super::grading::{grading_request, is_affirmed};
use crate::error::ChatEvalResult;
use crate::model::LikelihoodRequest;

impl ApiModel {
    /// Ask the endpoint whether `request.continuation` answers `request.context`.
    pub(super) async fn grade(&self, request: &LikelihoodRequest) -> ChatEvalResult<bool> {
        let reply = self.client.complete(&grading_request(request)).await?;
        Ok(is_affirmed(&reply))
    }
}
