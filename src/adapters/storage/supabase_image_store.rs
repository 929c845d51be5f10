//! Supabase Storage Adapter
//!
//! Uploads generated images through the Supabase storage REST API using the
//! service role key, and exposes them under the bucket's public path.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::config::StorageConfig;
use crate::ports::{ImageStore, StorageError};

/// Image store backed by a Supabase storage bucket
#[derive(Debug, Clone)]
pub struct SupabaseImageStore {
    client: Client,
    base_url: String,
    service_role_key: SecretString,
    timeout: Duration,
}

impl SupabaseImageStore {
    /// Create a store for the given Supabase project
    ///
    /// Uploads are bounded by `config.timeout_secs`.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StorageError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
            timeout: config.timeout(),
        })
    }

    fn object_url(&self, bucket: &str, file_name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, file_name)
    }
}

/// Reject names that would escape the bucket
pub(crate) fn validate_object_path(bucket: &str, file_name: &str) -> Result<(), StorageError> {
    if bucket.is_empty() || bucket.contains('/') {
        return Err(StorageError::InvalidPath(format!("bucket '{}'", bucket)));
    }
    if file_name.is_empty() || file_name.starts_with('/') || file_name.split('/').any(|s| s == "..")
    {
        return Err(StorageError::InvalidPath(format!("object '{}'", file_name)));
    }
    Ok(())
}

#[async_trait]
impl ImageStore for SupabaseImageStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_object_path(bucket, file_name)?;

        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(bucket, file_name))
            .bearer_auth(self.service_role_key.expose_secret())
            .header("apikey", self.service_role_key.expose_secret())
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StorageError::unavailable(format!(
                        "upload timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    StorageError::unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(bucket, file_name, size, "Uploaded image to storage");
        Ok(())
    }

    fn public_url(&self, bucket: &str, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, file_name
        )
    }
}
