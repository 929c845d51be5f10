//! Image Store Port - Durable hosting for generated images.
//!
//! Generated images are re-hosted in first-party storage because the
//! generation service's URLs may expire.

use async_trait::async_trait;
use thiserror::Error;

/// Port for persisting image bytes behind a stable public URL.
///
/// # Contract
///
/// After `upload` succeeds, `public_url` for the same bucket and file name
/// must resolve to the uploaded bytes.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads raw bytes under `bucket/file_name`.
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Returns the public URL of a stored object.
    fn public_url(&self, bucket: &str, file_name: &str) -> String;
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store rejected the upload.
    #[error("upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Could not reach the store.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Invalid bucket or object name.
    #[error("invalid object path: {0}")]
    InvalidPath(String),
}

impl StorageError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
