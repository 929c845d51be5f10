//! Canvas Chat server entry point.

use canvas_chat::config::AppConfig;
use canvas_chat::server::{build_pipeline, build_router};
use canvas_chat::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    telemetry::init(&config.server);

    config.validate()?;

    let pipeline = build_pipeline(&config)?;
    let app = build_router(&config, pipeline);

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        image_model = %config.image.model,
        "Canvas Chat server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
