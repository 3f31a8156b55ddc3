//! PublishJob aggregate - one in-memory publish request and its progress.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::errors::JobError;
use super::job_status::JobStatus;
use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, JobId, Percentage, PublishId, StateMachine, ValidationError};
use crate::ports::VideoPayload;

/// Default cover frame offset for new jobs.
pub const DEFAULT_COVER_TIMESTAMP_MS: u64 = 1000;

/// Where TikTok gets the video bytes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadSource {
    #[default]
    FileUpload,
    PullFromUrl,
}

impl fmt::Display for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSource::FileUpload => write!(f, "FILE_UPLOAD"),
            UploadSource::PullFromUrl => write!(f, "PULL_FROM_URL"),
        }
    }
}

/// A single publish request.
///
/// User-editable fields change only while the job is idle. Lifecycle fields
/// (`status`, `progress`, `publish_id`, `error`, `status_message`) are
/// crate-private to mutate and driven by the publish orchestrator.
#[derive(Debug, Clone)]
pub struct PublishJob {
    id: JobId,
    account_id: Option<AccountId>,
    title: String,
    privacy_level: String,
    disable_comment: bool,
    disable_duet: bool,
    disable_stitch: bool,
    video_cover_timestamp_ms: u64,
    source: UploadSource,
    file: Option<Arc<dyn VideoPayload>>,
    video_url: Option<String>,

    status: JobStatus,
    progress: Percentage,
    publish_id: Option<PublishId>,
    error: Option<String>,
    status_message: Option<String>,
}

impl PublishJob {
    /// Creates an idle job targeting `account`, defaulting privacy to the
    /// account's first offered level.
    pub fn new(account: Option<&Account>) -> Self {
        Self {
            id: JobId::new(),
            account_id: account.map(|a| a.id().clone()),
            title: String::new(),
            privacy_level: account
                .map(|a| a.default_privacy_level())
                .unwrap_or_else(|| crate::domain::account::PUBLIC_TO_EVERYONE.to_string()),
            disable_comment: false,
            disable_duet: false,
            disable_stitch: false,
            video_cover_timestamp_ms: DEFAULT_COVER_TIMESTAMP_MS,
            source: UploadSource::FileUpload,
            file: None,
            video_url: None,
            status: JobStatus::Idle,
            progress: Percentage::ZERO,
            publish_id: None,
            error: None,
            status_message: None,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn privacy_level(&self) -> &str {
        &self.privacy_level
    }

    pub fn disable_comment(&self) -> bool {
        self.disable_comment
    }

    pub fn disable_duet(&self) -> bool {
        self.disable_duet
    }

    pub fn disable_stitch(&self) -> bool {
        self.disable_stitch
    }

    pub fn video_cover_timestamp_ms(&self) -> u64 {
        self.video_cover_timestamp_ms
    }

    pub fn source(&self) -> UploadSource {
        self.source
    }

    pub fn file(&self) -> Option<&Arc<dyn VideoPayload>> {
        self.file.as_ref()
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn progress(&self) -> Percentage {
        self.progress
    }

    pub fn publish_id(&self) -> Option<&PublishId> {
        self.publish_id.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // === Editing (idle only) ===

    fn ensure_editable(&self) -> Result<(), JobError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(JobError::NotEditable(self.status))
        }
    }

    pub fn set_account(&mut self, account: &Account) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.account_id = Some(account.id().clone());
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.title = title.into();
        Ok(())
    }

    pub fn set_privacy_level(&mut self, level: impl Into<String>) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.privacy_level = level.into();
        Ok(())
    }

    pub fn set_disable_comment(&mut self, disabled: bool) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.disable_comment = disabled;
        Ok(())
    }

    pub fn set_disable_duet(&mut self, disabled: bool) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.disable_duet = disabled;
        Ok(())
    }

    pub fn set_disable_stitch(&mut self, disabled: bool) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.disable_stitch = disabled;
        Ok(())
    }

    pub fn set_video_cover_timestamp_ms(&mut self, ms: u64) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.video_cover_timestamp_ms = ms;
        Ok(())
    }

    /// Switches the source kind, dropping the media of the other kind.
    pub fn set_source(&mut self, source: UploadSource) -> Result<(), JobError> {
        self.ensure_editable()?;
        self.source = source;
        match source {
            UploadSource::FileUpload => self.video_url = None,
            UploadSource::PullFromUrl => self.file = None,
        }
        Ok(())
    }

    /// Selects a local file and switches the source to FILE_UPLOAD.
    pub fn use_file(&mut self, file: Arc<dyn VideoPayload>) -> Result<(), JobError> {
        self.set_source(UploadSource::FileUpload)?;
        self.file = Some(file);
        Ok(())
    }

    /// Selects a remote URL and switches the source to PULL_FROM_URL.
    pub fn use_url(&mut self, url: impl Into<String>) -> Result<(), JobError> {
        self.set_source(UploadSource::PullFromUrl)?;
        self.video_url = Some(url.into());
        Ok(())
    }

    /// Whether the job has everything needed to start publishing.
    pub fn ensure_ready(&self) -> Result<(), JobError> {
        self.ensure_editable()?;
        if self.account_id.is_none() {
            return Err(JobError::Incomplete("account"));
        }
        if self.title.trim().is_empty() {
            return Err(JobError::Incomplete("title"));
        }
        let has_media = match self.source {
            UploadSource::FileUpload => self.file.is_some(),
            UploadSource::PullFromUrl => self
                .video_url
                .as_deref()
                .is_some_and(|u| !u.trim().is_empty()),
        };
        if !has_media {
            return Err(JobError::Incomplete(match self.source {
                UploadSource::FileUpload => "file",
                UploadSource::PullFromUrl => "video_url",
            }));
        }
        Ok(())
    }

    pub fn is_deletable(&self) -> bool {
        self.status.is_editable()
    }

    // === Lifecycle (orchestrator only) ===

    pub(crate) fn advance(
        &mut self,
        status: JobStatus,
        progress: u8,
        message: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(status)?;
        self.progress = Percentage::new(progress);
        self.status_message = Some(message.into());
        Ok(())
    }

    pub(crate) fn report_progress(&mut self, progress: u8, message: impl Into<String>) {
        self.progress = Percentage::new(progress);
        self.status_message = Some(message.into());
    }

    pub(crate) fn record_publish_id(&mut self, publish_id: PublishId) {
        self.publish_id = Some(publish_id);
    }

    /// Moves an in-flight job to `error`. Terminal jobs are left untouched.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        if self.status.can_transition_to(&JobStatus::Error) {
            self.status = JobStatus::Error;
            self.error = Some(message.into());
            self.status_message = None;
        }
    }
}
