//! In-Memory Image Store Adapter
//!
//! Keeps uploaded images in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::supabase_image_store::validate_object_path;
use crate::ports::{ImageStore, StorageError};

/// A stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory image store
#[derive(Debug, Clone)]
pub struct InMemoryImageStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<(String, String), StoredImage>>>,
    fail_uploads: bool,
}

impl InMemoryImageStore {
    /// Create an empty store serving from `https://storage.test`
    pub fn new() -> Self {
        Self::with_base_url("https://storage.test")
    }

    /// Create an empty store serving from the given base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            fail_uploads: false,
        }
    }

    /// Make every upload fail (useful for tests)
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::new()
        }
    }

    /// Fetch a stored object
    pub async fn get(&self, bucket: &str, file_name: &str) -> Option<StoredImage> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), file_name.to_string()))
            .cloned()
    }

    /// Get the number of stored objects
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.objects.write().await.clear();
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_object_path(bucket, file_name)?;

        if self.fail_uploads {
            return Err(StorageError::unavailable("in-memory store configured to fail"));
        }

        self.objects.write().await.insert(
            (bucket.to_string(), file_name.to_string()),
            StoredImage {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, file_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket, file_name)
    }
}
