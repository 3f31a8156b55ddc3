//! Console rendering of accounts and job progress.

use serde_json::json;

use tikpublish::domain::account::{privacy_label, Account};
use tikpublish::domain::publish::{JobStatus, PublishJob};
use tikpublish::ports::JobObserver;

/// Prints one line per job update.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl JobObserver for ConsoleObserver {
    fn job_updated(&self, job: &PublishJob) {
        println!("{}", job_line(job));
    }
}

fn short_id(job: &PublishJob) -> String {
    job.id().to_string().chars().take(8).collect()
}

pub fn job_line(job: &PublishJob) -> String {
    let detail = match job.status() {
        JobStatus::Error => job.error().unwrap_or("unknown error").to_string(),
        _ => job.status_message().unwrap_or_default().to_string(),
    };
    format!(
        "[{}] {:<10} {:>3}%  {}",
        short_id(job),
        job.status().to_string(),
        job.progress().value(),
        detail
    )
}

pub fn account_line(account: &Account) -> String {
    match account.creator_info() {
        Some(info) => format!(
            "{}  {}  @{} ({})  privacy: {}  max {}s",
            account.id(),
            account.display_name(),
            info.creator_username,
            info.creator_nickname,
            info.privacy_level_options
                .iter()
                .map(|p| privacy_label(p))
                .collect::<Vec<_>>()
                .join(", "),
            info.max_video_post_duration_sec
        ),
        None => format!("{}  {}  (not verified)", account.id(), account.display_name()),
    }
}

/// JSON view of an account with the token left out.
pub fn account_json(account: &Account) -> serde_json::Value {
    json!({
        "id": account.id(),
        "label": account.label(),
        "creatorInfo": account.creator_info(),
        "fetchedAt": account.fetched_at(),
    })
}
