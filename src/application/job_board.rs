//! JobBoard - the in-memory list of publish jobs.
//!
//! Jobs are never persisted; they live as long as the board.

use crate::domain::account::Account;
use crate::domain::foundation::JobId;
use crate::domain::publish::{JobError, JobStatus, PublishJob};

/// Ordered collection of publish jobs.
#[derive(Debug, Default)]
pub struct JobBoard {
    jobs: Vec<PublishJob>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an idle job for `account` (normally the first stored account).
    pub fn create(&mut self, account: Option<&Account>) -> &mut PublishJob {
        let job = PublishJob::new(account);
        tracing::debug!(job_id = %job.id(), "Job created");
        self.jobs.push(job);
        let last = self.jobs.len() - 1;
        &mut self.jobs[last]
    }

    pub fn get(&self, id: JobId) -> Option<&PublishJob> {
        self.jobs.iter().find(|j| j.id() == id)
    }

    pub fn get_mut(&mut self, id: JobId) -> Result<&mut PublishJob, JobError> {
        self.jobs
            .iter_mut()
            .find(|j| j.id() == id)
            .ok_or(JobError::NotFound(id))
    }

    /// Removes an idle job. Jobs that have started cannot be deleted.
    pub fn remove(&mut self, id: JobId) -> Result<PublishJob, JobError> {
        let index = self
            .jobs
            .iter()
            .position(|j| j.id() == id)
            .ok_or(JobError::NotFound(id))?;
        if !self.jobs[index].is_deletable() {
            return Err(JobError::NotEditable(self.jobs[index].status()));
        }
        Ok(self.jobs.remove(index))
    }

    pub fn jobs(&self) -> &[PublishJob] {
        &self.jobs
    }

    /// Idle jobs, ready to hand to the orchestrator.
    pub fn idle_mut(&mut self) -> impl Iterator<Item = &mut PublishJob> {
        self.jobs
            .iter_mut()
            .filter(|j| j.status() == JobStatus::Idle)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
