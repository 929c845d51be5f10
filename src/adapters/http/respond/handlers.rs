//! HTTP handlers for the respond endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::application::handlers::assistant::{GetApiResponseHandler, GetApiResponseQuery};

use super::dto::{ErrorResponse, HealthResponse, RespondRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RespondHandlers {
    get_api_response: Arc<GetApiResponseHandler>,
}

impl RespondHandlers {
    pub fn new(get_api_response: Arc<GetApiResponseHandler>) -> Self {
        Self { get_api_response }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/respond - Resolve a prompt to a text or image response
pub async fn respond(
    State(handlers): State<RespondHandlers>,
    Json(req): Json<RespondRequest>,
) -> Response {
    if req.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Prompt must not be empty")),
        )
            .into_response();
    }

    let query = GetApiResponseQuery {
        prompt: req.prompt,
        history: req.history.into_iter().map(Into::into).collect(),
    };

    let span = tracing::info_span!("respond", request_id = %Uuid::new_v4());
    let response = handlers
        .get_api_response
        .handle(query)
        .instrument(span)
        .await;
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::default())
}
