//! Handlers - one per user-facing operation of the publish pipeline.

mod exchange_token;
mod poll_status;
mod publish_video;
mod upload_video;
mod verify_creator;

pub use exchange_token::{ExchangeTokenCommand, ExchangeTokenHandler, ExchangeTokenResult};
pub use poll_status::{
    PollAttempt, PollOutcome, StatusPoller, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
pub use publish_video::{PublishOrchestrator, PublishOutcome};
pub use upload_video::{ChunkProgress, ChunkedUploader};
pub use verify_creator::{CreatorVerifier, VerificationError};
