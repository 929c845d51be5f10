//! Image Generator Port - Interface for the external image generation service.
//!
//! The service answers a prompt with an event stream that eventually names a
//! (possibly short-lived) image URL. Downloading that URL is a separate port
//! so re-hosting can be tested without a live service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::StreamFailure;

/// Port for prompt-to-image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates an image and returns the service's URL for it.
    ///
    /// Resolves on the first terminal frame of the stream.
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError>;
}

/// Port for fetching the bytes of a generated image.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>, ImageGenerationError>;
}

/// Image generation errors.
#[derive(Debug, Error)]
pub enum ImageGenerationError {
    /// The service answered with a non-success status.
    #[error("image service returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics only.
        body: String,
    },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The event stream failed (error frame, malformed frame, no result).
    #[error(transparent)]
    Stream(#[from] StreamFailure),

    /// Fetching the generated image failed.
    #[error("failed to download generated image: {0}")]
    Download(String),
}

impl ImageGenerationError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a download error.
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download(message.into())
    }
}
