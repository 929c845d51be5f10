//! HTTP DTOs for the respond endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationTurn, TurnRole};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request for an assistant response.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<HistoryTurnDto>,
}

/// One prior turn as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurnDto {
    pub role: TurnRole,
    pub text: String,
}

impl From<HistoryTurnDto> for ConversationTurn {
    fn from(dto: HistoryTurnDto) -> Self {
        ConversationTurn::new(dto.role, dto.text)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
