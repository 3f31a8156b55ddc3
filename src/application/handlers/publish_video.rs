//! PublishOrchestrator - drives one job through verify, validate, init,
//! upload and status polling.
//!
//! # Flow
//!
//! ```text
//! idle → querying → uploading → processing → done
//!            ↘          ↘            ↘
//!                      error
//! ```
//!
//! Each step records status, progress and a message on the job and reports
//! it to the `JobObserver`. Nothing is retried; the first failure moves the
//! job to `error` with the failure's message.

use futures::future::join_all;
use std::sync::Arc;

use super::poll_status::{PollOutcome, StatusPoller};
use super::upload_video::ChunkedUploader;
use super::verify_creator::CreatorVerifier;
use crate::application::account_book::SharedAccountBook;
use crate::domain::account::Account;
use crate::domain::publish::{
    validate_video_size, ChunkPlan, JobError, JobStatus, PublishError, PublishJob, UploadSource,
};
use crate::ports::{
    ContentPostingApi, JobObserver, NoopObserver, PostInfo, PublishInitRequest, SourceInfo,
    VideoPayload, VideoUploader,
};

/// How a successful publish ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// TikTok confirmed `PUBLISH_COMPLETE`.
    Published,
    /// Submitted without confirmation; the creator should check TikTok.
    Submitted,
}

/// Media resolved for the init call.
enum Media {
    Url,
    File {
        file: Arc<dyn VideoPayload>,
        plan: ChunkPlan,
    },
}

/// Runs publish flows. One instance can drive many jobs concurrently.
pub struct PublishOrchestrator {
    api: Arc<dyn ContentPostingApi>,
    verifier: CreatorVerifier,
    uploader: ChunkedUploader,
    poller: StatusPoller,
    accounts: SharedAccountBook,
    observer: Arc<dyn JobObserver>,
}

impl PublishOrchestrator {
    pub fn new(
        api: Arc<dyn ContentPostingApi>,
        uploader: Arc<dyn VideoUploader>,
        accounts: SharedAccountBook,
    ) -> Self {
        Self {
            verifier: CreatorVerifier::new(api.clone()),
            uploader: ChunkedUploader::new(uploader),
            poller: StatusPoller::new(api.clone()),
            api,
            accounts,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the status poller (interval and attempt budget).
    pub fn with_poller(mut self, poller: StatusPoller) -> Self {
        self.poller = poller;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn JobObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Publishes `job`.
    ///
    /// # Errors
    ///
    /// - `PublishError::Job` / `PublishError::AccountNotFound` when the job
    ///   cannot start; the job is left untouched.
    /// - Any pipeline failure; the job is then in `error` with the same
    ///   message and keeps its `publish_id` if one was issued.
    pub async fn publish(&self, job: &mut PublishJob) -> Result<PublishOutcome, PublishError> {
        job.ensure_ready()?;
        let account_id = job
            .account_id()
            .cloned()
            .ok_or(JobError::Incomplete("account"))?;
        let account = self
            .accounts
            .read()
            .await
            .get(&account_id)
            .cloned()
            .ok_or_else(|| PublishError::AccountNotFound(account_id.clone()))?;

        tracing::info!(job_id = %job.id(), account_id = %account_id, source = %job.source(), "Publishing job");

        match self.run(job, account).await {
            Ok(outcome) => {
                tracing::info!(job_id = %job.id(), ?outcome, "Job finished");
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    job_id = %job.id(),
                    publish_id = ?job.publish_id().map(|p| p.as_str()),
                    error = %e,
                    "Job failed"
                );
                job.fail(e.to_string());
                self.notify(job);
                Err(e)
            }
        }
    }

    /// Publishes several jobs concurrently. Results are in input order.
    pub async fn publish_all<'a, I>(&self, jobs: I) -> Vec<Result<PublishOutcome, PublishError>>
    where
        I: IntoIterator<Item = &'a mut PublishJob>,
    {
        join_all(jobs.into_iter().map(|job| self.publish(job))).await
    }

    async fn run(
        &self,
        job: &mut PublishJob,
        mut account: Account,
    ) -> Result<PublishOutcome, PublishError> {
        job.advance(JobStatus::Querying, 5, "Querying creator info…")?;
        self.notify(job);

        if !account.is_verified() {
            account = self
                .verifier
                .verify_account(&self.accounts, account.id())
                .await?;
        }

        job.advance(JobStatus::Uploading, 15, "Initialising upload…")?;
        self.notify(job);

        let media = Self::resolve_media(job)?;
        let source_info = match (&media, job.video_url()) {
            (Media::File { plan, .. }, _) => SourceInfo::file_upload(plan),
            (Media::Url, Some(url)) => SourceInfo::pull_from_url(url),
            (Media::Url, None) => return Err(JobError::Incomplete("video_url").into()),
        };
        let request = PublishInitRequest {
            post_info: PostInfo::from_job(job),
            source_info,
        };

        let init = self.api.init_publish(account.token(), &request).await?;
        let publish_id = init.publish_id.clone();
        job.record_publish_id(init.publish_id);
        job.report_progress(30, "Upload initialised…");
        self.notify(job);
        tracing::debug!(job_id = %job.id(), %publish_id, "Publish initialised");

        if let Media::File { file, plan } = &media {
            match init.upload_url.as_deref() {
                Some(upload_url) => {
                    self.uploader
                        .upload(file.as_ref(), upload_url, plan, |chunk| {
                            job.report_progress(chunk.job_progress(), chunk.message());
                            self.notify(job);
                        })
                        .await?;
                }
                None => tracing::warn!(%publish_id, "Init returned no upload URL; skipping upload"),
            }
        }

        job.advance(JobStatus::Processing, 85, "Processing on TikTok…")?;
        self.notify(job);

        let outcome = self
            .poller
            .poll(account.token(), &publish_id, |attempt| {
                job.report_progress(attempt.job_progress(), attempt.message());
                self.notify(job);
            })
            .await?;

        let (result, message) = match outcome {
            PollOutcome::Completed { .. } => (PublishOutcome::Published, "Published!"),
            PollOutcome::Unconfirmed { .. } => (
                PublishOutcome::Submitted,
                "Submitted! Check TikTok for status.",
            ),
        };
        job.advance(JobStatus::Done, 100, message)?;
        self.notify(job);
        Ok(result)
    }

    /// Validates file size before any upload call.
    fn resolve_media(job: &PublishJob) -> Result<Media, PublishError> {
        match job.source() {
            UploadSource::PullFromUrl => Ok(Media::Url),
            UploadSource::FileUpload => {
                let file = job.file().cloned().ok_or(JobError::Incomplete("file"))?;
                validate_video_size(file.size())?;
                let plan = ChunkPlan::for_size(file.size());
                Ok(Media::File { file, plan })
            }
        }
    }

    fn notify(&self, job: &PublishJob) {
        self.observer.job_updated(job);
    }
}
