//! HTTP adapter for the assistant respond endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, HistoryTurnDto, RespondRequest};
pub use handlers::RespondHandlers;
pub use routes::respond_routes;
