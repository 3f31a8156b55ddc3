//! Content Posting Port - TikTok's creator info, publish init and status calls.
//!
//! This port abstracts the TikTok Content Posting API so the publish
//! pipeline can be driven against the real API, a same-origin proxy, or a
//! scripted mock.
//!
//! # Design
//!
//! - Every response is decoded at the adapter boundary into `Ok(data)` or
//!   an [`ApiError`]; callers never see half-decoded JSON.
//! - Upstream messages are carried verbatim so they can be shown to users.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::account::{BearerToken, CreatorInfo};
use crate::domain::foundation::PublishId;
use crate::domain::publish::{ChunkPlan, PublishJob, UploadSource};

/// Port for the TikTok Content Posting API.
#[async_trait]
pub trait ContentPostingApi: Send + Sync {
    /// Queries the creator's posting capabilities.
    async fn query_creator_info(&self, token: &BearerToken) -> Result<CreatorInfo, ApiError>;

    /// Starts a publish attempt. For FILE_UPLOAD the response carries the
    /// upload target.
    async fn init_publish(
        &self,
        token: &BearerToken,
        request: &PublishInitRequest,
    ) -> Result<PublishInit, ApiError>;

    /// Fetches the processing status of a publish attempt.
    async fn fetch_publish_status(
        &self,
        token: &BearerToken,
        publish_id: &PublishId,
    ) -> Result<PublishStatusReport, ApiError>;
}

/// Body of the publish init call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishInitRequest {
    pub post_info: PostInfo,
    pub source_info: SourceInfo,
}

/// Caption and interaction settings for the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostInfo {
    pub title: String,
    pub privacy_level: String,
    pub disable_duet: bool,
    pub disable_comment: bool,
    pub disable_stitch: bool,
    pub video_cover_timestamp_ms: u64,
}

impl PostInfo {
    pub fn from_job(job: &PublishJob) -> Self {
        Self {
            title: job.title().to_string(),
            privacy_level: job.privacy_level().to_string(),
            disable_duet: job.disable_duet(),
            disable_comment: job.disable_comment(),
            disable_stitch: job.disable_stitch(),
            video_cover_timestamp_ms: job.video_cover_timestamp_ms(),
        }
    }
}

/// Where TikTok takes the video from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceInfo {
    PullFromUrl {
        video_url: String,
    },
    FileUpload {
        video_size: u64,
        chunk_size: u64,
        total_chunk_count: u64,
    },
}

impl SourceInfo {
    pub fn file_upload(plan: &ChunkPlan) -> Self {
        SourceInfo::FileUpload {
            video_size: plan.video_size(),
            chunk_size: plan.chunk_size(),
            total_chunk_count: plan.total_chunks(),
        }
    }

    pub fn pull_from_url(url: impl Into<String>) -> Self {
        SourceInfo::PullFromUrl {
            video_url: url.into(),
        }
    }

    pub fn kind(&self) -> UploadSource {
        match self {
            SourceInfo::PullFromUrl { .. } => UploadSource::PullFromUrl,
            SourceInfo::FileUpload { .. } => UploadSource::FileUpload,
        }
    }
}

/// Successful publish init.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishInit {
    pub publish_id: PublishId,
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Remote processing state of a publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    PublishComplete,
    Failed,
    /// Any other value TikTok reports (e.g. `PROCESSING_UPLOAD`).
    InProgress(String),
    /// No status in the payload.
    Unknown,
}

impl RemoteStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("PUBLISH_COMPLETE") => RemoteStatus::PublishComplete,
            Some("FAILED") => RemoteStatus::Failed,
            Some(other) => RemoteStatus::InProgress(other.to_string()),
            None => RemoteStatus::Unknown,
        }
    }

    /// Label shown while waiting.
    pub fn label(&self) -> &str {
        match self {
            RemoteStatus::PublishComplete => "PUBLISH_COMPLETE",
            RemoteStatus::Failed => "FAILED",
            RemoteStatus::InProgress(s) => s,
            RemoteStatus::Unknown => "waiting",
        }
    }
}

/// Status payload returned by the status fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PublishStatusReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub fail_reason: Option<String>,
}

impl PublishStatusReport {
    pub fn new(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            fail_reason: None,
        }
    }

    pub fn failed(reason: &str) -> Self {
        Self {
            status: Some("FAILED".to_string()),
            fail_reason: Some(reason.to_string()),
        }
    }

    pub fn remote_status(&self) -> RemoteStatus {
        RemoteStatus::parse(self.status.as_deref())
    }
}

/// Content posting errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Required input missing; no request was made.
    #[error("{0}")]
    MissingInput(String),

    /// TikTok returned an application-level error.
    #[error("{message}")]
    Upstream { message: String },

    /// Network failure or malformed response body.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
