//! Application wiring - builds adapters and handlers from configuration.

use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::ai::{GeminiConfig, GeminiTextGenerator};
use crate::adapters::http::{respond_routes, RespondHandlers};
use crate::adapters::image::HttpImageGenerator;
use crate::adapters::storage::SupabaseImageStore;
use crate::application::handlers::assistant::{
    GenerateReplyHandler, GetApiResponseHandler, SynthesizeImageHandler,
};
use crate::config::{AppConfig, ConfigError};
use crate::ports::{AIError, ImageGenerationError, StorageError};

/// Errors raised while assembling the application
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("text generator setup failed: {0}")]
    TextGenerator(#[from] AIError),

    #[error("image generator setup failed: {0}")]
    ImageGenerator(#[from] ImageGenerationError),

    #[error("image store setup failed: {0}")]
    ImageStore(#[from] StorageError),
}

/// Builds the response pipeline against the configured live services.
///
/// Each branch is bounded by `server.pipeline_budget()` so it resolves
/// before the HTTP timeout layer fires.
pub fn build_pipeline(config: &AppConfig) -> Result<GetApiResponseHandler, StartupError> {
    let (classifier, extractor) = config.classifier.build().map_err(ConfigError::from)?;

    let images = Arc::new(HttpImageGenerator::new(&config.image)?);
    let store = Arc::new(SupabaseImageStore::new(&config.storage)?);
    let text = Arc::new(GeminiTextGenerator::new(GeminiConfig::from_app_config(
        &config.ai,
    )?)?);

    let synthesize =
        SynthesizeImageHandler::new(images.clone(), images, store, config.storage.bucket.clone());
    let reply = GenerateReplyHandler::new(text);

    Ok(GetApiResponseHandler::new(
        Arc::new(classifier),
        Arc::new(extractor),
        Arc::new(synthesize),
        Arc::new(reply),
    )
    .with_branch_timeout(config.server.pipeline_budget()))
}

/// Wraps the routes in tracing, CORS and timeout layers.
pub fn build_router(config: &AppConfig, pipeline: GetApiResponseHandler) -> Router {
    respond_routes(RespondHandlers::new(Arc::new(pipeline)))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server.allowed_origins()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
