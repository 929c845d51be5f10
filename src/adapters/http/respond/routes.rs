//! HTTP routes for the respond endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, respond, RespondHandlers};

/// Creates the router with all endpoints.
pub fn respond_routes(handlers: RespondHandlers) -> Router {
    Router::new()
        .route("/api/respond", post(respond))
        .route("/health", get(health))
        .with_state(handlers)
}
