//! Publish pipeline configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Status polling settings
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    /// Delay before each status query, in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Status queries before a job is reported as submitted
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl PublishConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_poll_attempts == 0 {
            return Err(ValidationError::InvalidPollAttempts);
        }
        Ok(())
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

fn default_poll_interval() -> u64 {
    3
}

fn default_max_poll_attempts() -> u32 {
    30
}
