//! Conversation turns supplied by the caller as model context.

use serde::{Deserialize, Serialize};

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// User input.
    User,
    /// Model-authored reply. Accepts `"model"` on the wire.
    #[serde(alias = "model")]
    Assistant,
}

/// One historical exchange, oldest first in a history.
///
/// History is read-only context: nothing in this crate reorders or
/// rewrites the turns it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    /// Ordered text segments of the turn.
    pub parts: Vec<String>,
}

impl ConversationTurn {
    /// Creates a single-part turn.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![text.into()],
        }
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    /// Creates an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }

    /// All parts concatenated.
    pub fn text(&self) -> String {
        self.parts.concat()
    }
}
