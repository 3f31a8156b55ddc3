//! Application layer - handlers and the in-memory state they coordinate.
//!
//! The account book and job board hold session state; handlers drive the
//! TikTok ports against them.

pub mod account_book;
pub mod handlers;
pub mod job_board;

pub use account_book::{AccountBook, AccountBookError, SharedAccountBook};
pub use handlers::{
    ChunkProgress, ChunkedUploader, CreatorVerifier, ExchangeTokenCommand, ExchangeTokenHandler,
    ExchangeTokenResult, PollAttempt, PollOutcome, PublishOrchestrator, PublishOutcome,
    StatusPoller, VerificationError, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
pub use job_board::JobBoard;
