//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid TikTok API base URL")]
    InvalidApiBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Data directory must not be empty")]
    EmptyDataDir,

    #[error("Poll attempts must be at least 1")]
    InvalidPollAttempts,

    #[error("OAuth redirect URI must be an http(s) URL")]
    InvalidRedirectUri,
}
