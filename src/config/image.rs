//! Image generation service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Image generation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Streaming generation endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Generation model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for the whole generation stream, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ImageConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate image service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("image.endpoint"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("IMAGE_MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://subnp.com/api/free/generate".to_string()
}

fn default_model() -> String {
    "flux".to_string()
}

fn default_timeout() -> u64 {
    120
}
