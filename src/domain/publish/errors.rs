//! Publish-specific error types.

use thiserror::Error;

use super::job_status::JobStatus;
use super::media::MediaValidationError;
use crate::domain::foundation::{AccountId, JobId, ValidationError};
use crate::ports::ApiError;

/// Errors editing or managing a job before it is published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("Job is {0}; only idle jobs can be changed")]
    NotEditable(JobStatus),

    #[error("Job is missing {0}")]
    Incomplete(&'static str),

    #[error("Job not found: {0}")]
    NotFound(JobId),
}

/// Errors raised while a job moves through the publish pipeline.
///
/// The `Display` text is what ends up in the job's `error` field, so
/// upstream and transport messages are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Local input missing, or changed underneath a running step.
    #[error("{0}")]
    Config(String),

    /// TikTok answered with an application-level error.
    #[error("{0}")]
    Upstream(String),

    /// File rejected before contacting TikTok.
    #[error(transparent)]
    Validation(#[from] MediaValidationError),

    /// Network failure or unreadable payload.
    #[error("{0}")]
    Transport(String),

    /// TikTok reported FAILED while processing the upload.
    #[error("TikTok processing failed: {reason}")]
    ProcessingFailed { reason: String },

    /// Job could not be started.
    #[error(transparent)]
    Job(#[from] JobError),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Internal state machine violation.
    #[error("{0}")]
    InvalidState(#[from] ValidationError),
}

impl PublishError {
    pub fn processing_failed(reason: Option<&str>) -> Self {
        let reason = match reason {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => "unknown".to_string(),
        };
        PublishError::ProcessingFailed { reason }
    }
}

impl From<ApiError> for PublishError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::MissingInput(message) => PublishError::Config(message),
            ApiError::Upstream { message } => PublishError::Upstream(message),
            ApiError::Transport(message) => PublishError::Transport(message),
        }
    }
}
