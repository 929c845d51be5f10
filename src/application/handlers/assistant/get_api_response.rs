//! GetApiResponseHandler - Single entry point turning a prompt into a response
//!
//! Classifies the prompt, runs exactly one branch (image or text) and always
//! resolves to an `ApiResponse`. Branch failures, including a branch running
//! past its time budget, are logged and replaced by a fixed apology; they never
//! reach the caller as errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::domain::conversation::{ApiResponse, ConversationTurn};
use crate::domain::intent::{IntentClassifier, PromptExtractor};

use super::generate_reply::{GenerateReplyCommand, GenerateReplyHandler};
use super::synthesize_image::{SynthesizeImageCommand, SynthesizeImageHandler};

/// Returned when any step of the image branch fails
pub const IMAGE_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't generate the image right now. Please try again.";

/// Returned when the text branch fails
pub const TEXT_FAILURE_MESSAGE: &str =
    "Sorry, I am unable to respond right now. Please try again later or rephrase your question.";

/// Query for a response to one user prompt
#[derive(Debug, Clone)]
pub struct GetApiResponseQuery {
    pub prompt: String,
    /// Prior turns, oldest first
    pub history: Vec<ConversationTurn>,
}

/// Handler for the response pipeline
pub struct GetApiResponseHandler {
    classifier: Arc<IntentClassifier>,
    extractor: Arc<PromptExtractor>,
    synthesize: Arc<SynthesizeImageHandler>,
    reply: Arc<GenerateReplyHandler>,
    branch_timeout: Option<Duration>,
}

impl GetApiResponseHandler {
    pub fn new(
        classifier: Arc<IntentClassifier>,
        extractor: Arc<PromptExtractor>,
        synthesize: Arc<SynthesizeImageHandler>,
        reply: Arc<GenerateReplyHandler>,
    ) -> Self {
        Self {
            classifier,
            extractor,
            synthesize,
            reply,
            branch_timeout: None,
        }
    }

    /// Bounds each branch; an elapsed branch resolves to its apology.
    pub fn with_branch_timeout(mut self, budget: Duration) -> Self {
        self.branch_timeout = Some(budget);
        self
    }

    pub async fn handle(&self, query: GetApiResponseQuery) -> ApiResponse {
        let classification = self.classifier.classify(&query.prompt);
        tracing::info!(
            is_image_request = classification.is_image_request,
            confidence = classification.confidence,
            matched_patterns = ?classification.matched_patterns,
            "Classified prompt"
        );
        tracing::debug!(reasoning = %classification.reasoning_text(), "Classification reasoning");

        if classification.is_image_request {
            self.respond_with_image(&query.prompt).await
        } else {
            self.respond_with_text(query).await
        }
    }

    async fn respond_with_image(&self, prompt: &str) -> ApiResponse {
        let cmd = SynthesizeImageCommand {
            prompt: self.extractor.extract(prompt),
        };

        match self.bounded(self.synthesize.handle(cmd)).await {
            Some(Ok(result)) => ApiResponse::image(result.public_url),
            Some(Err(err)) => {
                tracing::error!(error = %err, "Image generation failed");
                ApiResponse::text(IMAGE_FAILURE_MESSAGE)
            }
            None => {
                tracing::error!(budget = ?self.branch_timeout, "Image generation timed out");
                ApiResponse::text(IMAGE_FAILURE_MESSAGE)
            }
        }
    }

    async fn respond_with_text(&self, query: GetApiResponseQuery) -> ApiResponse {
        let cmd = GenerateReplyCommand {
            prompt: query.prompt,
            history: query.history,
        };

        match self.bounded(self.reply.handle(cmd)).await {
            Some(Ok(text)) => ApiResponse::text(text),
            Some(Err(err)) => {
                tracing::error!(error = %err, "Text generation failed");
                ApiResponse::text(TEXT_FAILURE_MESSAGE)
            }
            None => {
                tracing::error!(budget = ?self.branch_timeout, "Text generation timed out");
                ApiResponse::text(TEXT_FAILURE_MESSAGE)
            }
        }
    }

    /// Runs `branch` within the budget. `None` means the budget elapsed.
    async fn bounded<T>(&self, branch: impl Future<Output = T>) -> Option<T> {
        match self.branch_timeout {
            Some(budget) => timeout(budget, branch).await.ok(),
            None => Some(branch.await),
        }
    }
}
