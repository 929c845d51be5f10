//! Conversation module - the data exchanged with the conversation layer.
//!
//! History arrives as ordered `ConversationTurn`s; every request resolves to
//! exactly one `ApiResponse`.

mod response;
mod turn;

pub use response::{ApiResponse, ResponseKind};
pub use turn::{ConversationTurn, TurnRole};
