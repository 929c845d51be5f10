//! SynthesizeImageHandler - Generate an image and re-host it in first-party storage

use std::sync::Arc;

use chrono::Utc;

use crate::ports::{
    ImageDownloader, ImageGenerationError, ImageGenerator, ImageStore, StorageError,
};

/// Content type of every stored image
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Command to synthesize an image
#[derive(Debug, Clone)]
pub struct SynthesizeImageCommand {
    /// Descriptive prompt, already stripped of request scaffolding
    pub prompt: String,
}

/// Result of a successful synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizeImageResult {
    /// Stable public URL in our storage
    pub public_url: String,
    /// URL the generation service returned (may be ephemeral)
    pub source_url: String,
    /// Object name within the bucket
    pub file_name: String,
}

/// Error type for image synthesis
#[derive(Debug, thiserror::Error)]
pub enum SynthesizeImageError {
    /// Generation, stream decoding or download failed
    #[error(transparent)]
    Generation(#[from] ImageGenerationError),
    /// Upload to storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Handler for image synthesis
pub struct SynthesizeImageHandler {
    generator: Arc<dyn ImageGenerator>,
    downloader: Arc<dyn ImageDownloader>,
    store: Arc<dyn ImageStore>,
    bucket: String,
}

impl SynthesizeImageHandler {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        downloader: Arc<dyn ImageDownloader>,
        store: Arc<dyn ImageStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            downloader,
            store,
            bucket: bucket.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeImageCommand,
    ) -> Result<SynthesizeImageResult, SynthesizeImageError> {
        // 1. Generate and wait for the first terminal frame
        let source_url = self.generator.generate(&cmd.prompt).await?;

        // 2. Fetch the bytes while the source URL is still live
        let bytes = self.downloader.download(&source_url).await?;

        // 3. Re-host under a timestamped name
        let file_name = image_file_name(Utc::now().timestamp_millis());
        self.store
            .upload(&self.bucket, &file_name, bytes, IMAGE_CONTENT_TYPE)
            .await?;

        let public_url = self.store.public_url(&self.bucket, &file_name);
        tracing::info!(source_url = %source_url, public_url = %public_url, "Image synthesized");

        Ok(SynthesizeImageResult {
            public_url,
            source_url,
            file_name,
        })
    }
}

/// Object name for an image stored at `millis` since the Unix epoch.
/// Two images in the same millisecond collide.
pub fn image_file_name(millis: i64) -> String {
    format!("img_{}.png", millis)
}
