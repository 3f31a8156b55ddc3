//! Job Observer Port - lets a front end render job progress.

use crate::domain::publish::PublishJob;

/// Notified after every change the publish pipeline makes to a job.
pub trait JobObserver: Send + Sync {
    fn job_updated(&self, job: &PublishJob);
}

/// Observer that ignores all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl JobObserver for NoopObserver {
    fn job_updated(&self, _job: &PublishJob) {}
}
