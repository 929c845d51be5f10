//! Canvas Chat - Conversational assistant backend
//!
//! Decides per prompt whether the user wants prose or a picture. Text
//! requests go to a conversational model with the conversation history as
//! context. Image requests are reduced to a descriptive prompt, rendered by
//! a streaming image service and re-hosted in first-party storage.
//! Every request resolves to a single `ApiResponse`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
