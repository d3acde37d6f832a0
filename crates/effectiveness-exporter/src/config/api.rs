//! Beacon explorer API configuration

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest batch the explorer accepts on the multi-validator endpoints
pub const MAX_CHUNK_SIZE: usize = 100;

/// Beacon explorer API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explorer base URL, without the `/api/v1` suffix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Validators per effectiveness request
    pub chunk_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://beacon.gnosischain.com".to_string(),
            request_timeout_secs: 5,
            chunk_size: MAX_CHUNK_SIZE,
        }
    }
}

impl ApiConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigurationError::InvalidValue {
                    key: "api.base_url".to_string(),
                    value: self.base_url.clone(),
                    reason: format!("unsupported scheme {}", url.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigurationError::InvalidValue {
                    key: "api.base_url".to_string(),
                    value: self.base_url.clone(),
                    reason: e.to_string(),
                })
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "api.request_timeout_secs".to_string(),
                value: self.request_timeout_secs.to_string(),
                reason: "Request timeout must be greater than 0".to_string(),
            });
        }

        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigurationError::InvalidValue {
                key: "api.chunk_size".to_string(),
                value: self.chunk_size.to_string(),
                reason: format!("Chunk size must be between 1 and {MAX_CHUNK_SIZE}"),
            });
        }

        Ok(())
    }
}
