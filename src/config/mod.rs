//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TIKPUBLISH_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tikpublish::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Calling TikTok at {}", config.tiktok.api_base_url);
//! ```

mod error;
mod oauth;
mod publish;
mod storage;
mod tiktok;

pub use error::{ConfigError, ValidationError};
pub use oauth::OAuthConfig;
pub use publish::PublishConfig;
pub use storage::StorageConfig;
pub use tiktok::TikTokConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment is a valid setup.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// TikTok API endpoint and timeout
    #[serde(default)]
    pub tiktok: TikTokConfig,

    /// Account list location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Status polling interval and budget
    #[serde(default)]
    pub publish: PublishConfig,

    /// Developer app credentials for the code exchange
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TIKPUBLISH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TIKPUBLISH__TIKTOK__API_BASE_URL=http://localhost:3000` -> `tiktok.api_base_url`
    /// - `TIKPUBLISH__PUBLISH__MAX_POLL_ATTEMPTS=10` -> `publish.max_poll_attempts = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TIKPUBLISH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tiktok.validate()?;
        self.storage.validate()?;
        self.publish.validate()?;
        self.oauth.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TIKPUBLISH__TIKTOK__API_BASE_URL",
        "TIKPUBLISH__TIKTOK__REQUEST_TIMEOUT_SECS",
        "TIKPUBLISH__STORAGE__DATA_DIR",
        "TIKPUBLISH__PUBLISH__POLL_INTERVAL_SECS",
        "TIKPUBLISH__PUBLISH__MAX_POLL_ATTEMPTS",
        "TIKPUBLISH__OAUTH__CLIENT_KEY",
        "TIKPUBLISH__OAUTH__CLIENT_SECRET",
        "TIKPUBLISH__OAUTH__REDIRECT_URI",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.tiktok.api_base_url, "https://open.tiktokapis.com");
        assert_eq!(config.publish.max_poll_attempts, 30);
        assert_eq!(config.publish.poll_interval(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TIKPUBLISH__TIKTOK__API_BASE_URL", "http://localhost:3000");
        env::set_var("TIKPUBLISH__TIKTOK__REQUEST_TIMEOUT_SECS", "15");
        env::set_var("TIKPUBLISH__STORAGE__DATA_DIR", "/tmp/tikpublish");
        env::set_var("TIKPUBLISH__PUBLISH__MAX_POLL_ATTEMPTS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.tiktok.api_base_url, "http://localhost:3000");
        assert_eq!(config.tiktok.timeout(), Duration::from_secs(15));
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/tikpublish"));
        assert_eq!(config.publish.max_poll_attempts, 5);
        assert_eq!(config.publish.poll_interval_secs, 3);
    }

    #[test]
    fn test_oauth_secret_is_loaded() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TIKPUBLISH__OAUTH__CLIENT_KEY", "awkey");
        env::set_var("TIKPUBLISH__OAUTH__CLIENT_SECRET", "shh");
        env::set_var("TIKPUBLISH__OAUTH__REDIRECT_URI", "https://example.com/callback");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.oauth.client_key.as_deref(), Some("awkey"));
        assert_eq!(
            config.oauth.client_secret.as_ref().map(|s| s.expose_secret().as_str()),
            Some("shh")
        );
        assert!(!format!("{:?}", config.oauth).contains("shh"));
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TIKPUBLISH__PUBLISH__MAX_POLL_ATTEMPTS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidPollAttempts));
    }
}
