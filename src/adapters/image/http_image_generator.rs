//! HTTP Image Generator - streaming client for the image generation service.
//!
//! Posts `{prompt, model}` and reads the `data: <json>` event stream until the
//! first terminal frame. The response is dropped as soon as a result is known,
//! which closes the connection instead of draining the rest of the stream.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::ImageConfig;
use crate::domain::generation::ImageStreamReader;
use crate::ports::{ImageDownloader, ImageGenerationError, ImageGenerator};

/// Streaming image generation client.
#[derive(Debug, Clone)]
pub struct HttpImageGenerator {
    client: Client,
    endpoint: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

impl HttpImageGenerator {
    /// Creates a client from image service configuration.
    pub fn new(config: &ImageConfig) -> Result<Self, ImageGenerationError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ImageGenerationError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            timeout: config.timeout(),
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ImageGenerationError {
        if err.is_timeout() {
            ImageGenerationError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ImageGenerationError::network(format!("Connection failed: {}", err))
        } else {
            ImageGenerationError::network(err.to_string())
        }
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "text/event-stream")
            .json(&GenerateRequest {
                prompt,
                model: &self.model,
            })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGenerationError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let mut reader = ImageStreamReader::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.map_transport_error(e))?;
            reader.push(&chunk);
            if reader.is_terminal() {
                break;
            }
        }
        drop(stream);

        let frames = reader.frames_seen();
        let outcome = reader.finish();
        match &outcome {
            Ok(url) => tracing::debug!(frames, url = %url, "Image generation stream resolved"),
            Err(failure) => tracing::warn!(frames, error = %failure, "Image generation stream failed"),
        }
        outcome.map_err(ImageGenerationError::from)
    }
}

#[async_trait]
impl ImageDownloader for HttpImageGenerator {
    async fn download(&self, url: &str) -> Result<Vec<u8>, ImageGenerationError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageGenerationError::download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageGenerationError::download(format!(
                "{} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageGenerationError::download(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_prompt_and_model() {
        let body = serde_json::to_value(GenerateRequest {
            prompt: "a red dragon",
            model: "flux",
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"prompt": "a red dragon", "model": "flux"}));
    }

    #[test]
    fn new_uses_configured_timeout() {
        let config = ImageConfig {
            timeout_secs: 7,
            ..Default::default()
        };
        let generator = HttpImageGenerator::new(&config).unwrap();

        assert_eq!(generator.timeout, Duration::from_secs(7));
        assert_eq!(generator.model, "flux");
    }
}
