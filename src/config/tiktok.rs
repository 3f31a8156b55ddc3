//! TikTok API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// TikTok Content Posting API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TikTokConfig {
    /// Origin the `/v2/...` endpoints are called on. Point this at a
    /// same-origin proxy or a test server to avoid calling TikTok directly.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl TikTokConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate TikTok configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 3600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://open.tiktokapis.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiktok_config_defaults() {
        let config = TikTokConfig::default();
        assert_eq!(config.api_base_url, "https://open.tiktokapis.com");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = TikTokConfig {
            api_base_url: "open.tiktokapis.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidApiBaseUrl));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = TikTokConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
