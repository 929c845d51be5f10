//! GenerateReplyHandler - Conversational text reply with history as context

use std::sync::Arc;

use crate::domain::conversation::ConversationTurn;
use crate::ports::{AIError, TextGenerationRequest, TextGenerator};

/// Framing applied to the first message of a conversation
pub const COLD_START_PREFIX: &str = "Please provide a comprehensive and helpful response to: ";

/// Command to generate a reply
#[derive(Debug, Clone)]
pub struct GenerateReplyCommand {
    pub prompt: String,
    /// Prior turns, oldest first
    pub history: Vec<ConversationTurn>,
}

/// Handler for text replies
pub struct GenerateReplyHandler {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateReplyHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Returns the generated text.
    pub async fn handle(&self, cmd: GenerateReplyCommand) -> Result<String, AIError> {
        let message = if cmd.history.is_empty() {
            format!("{}{}", COLD_START_PREFIX, cmd.prompt)
        } else {
            cmd.prompt
        };

        let turns = cmd.history.len();
        let response = self
            .generator
            .generate(TextGenerationRequest::new(cmd.history, message))
            .await?;

        tracing::debug!(
            model = %response.model,
            history_turns = turns,
            total_tokens = response.usage.total_tokens,
            "Text reply generated"
        );

        Ok(response.content)
    }
}
