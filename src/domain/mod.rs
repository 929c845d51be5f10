//! Domain layer containing the decision logic and domain types.
//!
//! # Module Organization
//!
//! - `intent` - Intent classification and prompt extraction (pure, no I/O)
//! - `conversation` - Conversation turns and the normalized response
//! - `generation` - Image generation event-stream decoding

pub mod conversation;
pub mod generation;
pub mod intent;
