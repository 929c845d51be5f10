//! HTTP adapters - REST API implementations.

pub mod respond;

pub use respond::{respond_routes, RespondHandlers};
