//! JobStatus enum for tracking the lifecycle of a publish job.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a publish job.
///
/// ```text
/// idle -> querying -> uploading -> processing -> done
///            \            \             \
///             +------------+-------------+--> error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Idle,
    Querying,
    Uploading,
    Processing,
    Done,
    Error,
}

impl JobStatus {
    /// Editable fields may only change while idle.
    pub fn is_editable(&self) -> bool {
        matches!(self, JobStatus::Idle)
    }
}

impl StateMachine for JobStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use JobStatus::*;
        match self {
            Idle => vec![Querying],
            Querying => vec![Uploading, Error],
            Uploading => vec![Processing, Error],
            Processing => vec![Done, Error],
            Done | Error => vec![],
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Idle => "idle",
            JobStatus::Querying => "querying",
            JobStatus::Uploading => "uploading",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}
