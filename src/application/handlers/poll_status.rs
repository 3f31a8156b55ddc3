//! StatusPoller - bounded polling of a publish attempt's processing status.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::account::BearerToken;
use crate::domain::foundation::PublishId;
use crate::domain::publish::PublishError;
use crate::ports::{ContentPostingApi, RemoteStatus};

/// Default delay before each status query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default number of status queries before giving up.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

/// How polling ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// TikTok reported `PUBLISH_COMPLETE`.
    Completed { attempts: u32 },
    /// Polling stopped without a terminal status because the budget ran out
    /// or a status call failed. The post was submitted anyway.
    Unconfirmed { attempts: u32 },
}

/// A non-terminal status seen while polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollAttempt {
    pub attempt: u32,
    pub status: RemoteStatus,
}

impl PollAttempt {
    /// Job progress while processing: 86..=99.
    pub fn job_progress(&self) -> u8 {
        let progress = 85u32.saturating_add(self.attempt).min(99);
        progress as u8
    }

    pub fn message(&self) -> String {
        format!("Processing… ({})", self.status.label())
    }
}

/// Polls publish status at a fixed interval up to an attempt budget.
pub struct StatusPoller {
    api: Arc<dyn ContentPostingApi>,
    interval: Duration,
    max_attempts: u32,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn ContentPostingApi>) -> Self {
        Self {
            api,
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Waits, queries, and repeats until a terminal status or the budget.
    ///
    /// # Errors
    ///
    /// `PublishError::ProcessingFailed` when TikTok reports `FAILED`. A status
    /// call that fails for any other reason ends polling as `Unconfirmed`.
    pub async fn poll<F>(
        &self,
        token: &BearerToken,
        publish_id: &PublishId,
        mut on_attempt: F,
    ) -> Result<PollOutcome, PublishError>
    where
        F: FnMut(PollAttempt) + Send,
    {
        for attempt in 1..=self.max_attempts {
            sleep(self.interval).await;

            let report = match self.api.fetch_publish_status(token, publish_id).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(%publish_id, attempt, error = %e, "Status check failed; stopping");
                    return Ok(PollOutcome::Unconfirmed { attempts: attempt });
                }
            };

            match report.remote_status() {
                RemoteStatus::PublishComplete => {
                    tracing::info!(%publish_id, attempt, "Publish complete");
                    return Ok(PollOutcome::Completed { attempts: attempt });
                }
                RemoteStatus::Failed => {
                    return Err(PublishError::processing_failed(report.fail_reason.as_deref()));
                }
                status => {
                    tracing::debug!(%publish_id, attempt, status = status.label(), "Still processing");
                    on_attempt(PollAttempt { attempt, status });
                }
            }
        }

        tracing::info!(%publish_id, attempts = self.max_attempts, "Status budget exhausted");
        Ok(PollOutcome::Unconfirmed {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tiktok::MockTikTokApi;
    use crate::ports::{ApiError, PublishStatusReport};
    use tokio::time::Instant;

    fn poll_args() -> (BearerToken, PublishId) {
        (BearerToken::new("act.1"), PublishId::new("v_pub_1"))
    }

    #[test]
    fn attempt_progress_caps_at_99() {
        let attempt = |n| PollAttempt {
            attempt: n,
            status: RemoteStatus::Unknown,
        };
        assert_eq!(attempt(1).job_progress(), 86);
        assert_eq!(attempt(14).job_progress(), 99);
        assert_eq!(attempt(30).job_progress(), 99);
        assert_eq!(attempt(1).message(), "Processing… (waiting)");
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_third_poll() {
        let api = MockTikTokApi::new()
            .with_status(PublishStatusReport::new("PROCESSING_UPLOAD"))
            .with_status(PublishStatusReport::new("PROCESSING_UPLOAD"))
            .with_status(PublishStatusReport::new("PUBLISH_COMPLETE"));
        let poller = StatusPoller::new(Arc::new(api.clone()));
        let (token, id) = poll_args();
        let started = Instant::now();
        let mut seen = Vec::new();

        let outcome = poller
            .poll(&token, &id, |a| seen.push(a.message()))
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Completed { attempts: 3 });
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(9) && elapsed < Duration::from_secs(10));
        assert_eq!(seen, vec!["Processing… (PROCESSING_UPLOAD)"; 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_status_is_an_error() {
        let api = MockTikTokApi::new().with_status(PublishStatusReport::failed("video_format"));
        let poller = StatusPoller::new(Arc::new(api));
        let (token, id) = poll_args();

        let err = poller.poll(&token, &id, |_| {}).await.unwrap_err();

        assert_eq!(err.to_string(), "TikTok processing failed: video_format");
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhaustion_is_unconfirmed() {
        let api = MockTikTokApi::new().with_status_fallback(PublishStatusReport::default());
        let poller = StatusPoller::new(Arc::new(api.clone())).with_max_attempts(5);
        let (token, id) = poll_args();

        let outcome = poller.poll(&token, &id, |_| {}).await.unwrap();

        assert_eq!(outcome, PollOutcome::Unconfirmed { attempts: 5 });
        assert_eq!(api.status_fetch_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn upstream_rejection_stops_quietly() {
        let api = MockTikTokApi::new()
            .with_status_result(Err(ApiError::upstream("access_token_invalid")));
        let poller = StatusPoller::new(Arc::new(api.clone()));
        let (token, id) = poll_args();

        let outcome = poller.poll(&token, &id, |_| {}).await.unwrap();

        assert_eq!(outcome, PollOutcome::Unconfirmed { attempts: 1 });
        assert_eq!(api.status_fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failure_stops_as_unconfirmed() {
        let api = MockTikTokApi::new()
            .with_status(PublishStatusReport::new("PROCESSING_UPLOAD"))
            .with_status_result(Err(ApiError::transport("Malformed TikTok response: eof")));
        let poller = StatusPoller::new(Arc::new(api.clone()));
        let (token, id) = poll_args();

        let outcome = poller.poll(&token, &id, |_| {}).await.unwrap();

        assert_eq!(outcome, PollOutcome::Unconfirmed { attempts: 2 });
        assert_eq!(api.status_fetch_count(), 2);
    }
}
