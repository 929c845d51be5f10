//! Image storage configuration (Supabase storage)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Image storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Supabase project URL
    pub supabase_url: String,

    /// Service role key used for uploads
    pub service_role_key: SecretString,

    /// Bucket receiving generated images
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Upload timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StorageConfig {
    /// Creates a configuration with the default bucket and timeout
    pub fn new(supabase_url: impl Into<String>, service_role_key: SecretString) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            service_role_key,
            bucket: default_bucket(),
            timeout_secs: default_timeout(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("storage.supabase_url"));
        }
        if self.service_role_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SERVICE_ROLE_KEY"));
        }
        if self.bucket.is_empty() || self.bucket.contains('/') {
            return Err(ValidationError::InvalidBucket);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_bucket() -> String {
    "generated-images".to_string()
}

fn default_timeout() -> u64 {
    60
}
