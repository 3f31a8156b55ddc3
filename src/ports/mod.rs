//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## TikTok Ports
//!
//! - `ContentPostingApi` - Creator info, publish init and publish status calls
//! - `VideoUploader` - Chunked PUTs to the upload target returned by init
//! - `OAuthTokenExchange` - Authorization-code grant for new bearer tokens
//!
//! ## Local Ports
//!
//! - `AccountStore` - Persistence of the account list
//! - `VideoPayload` - Readable handle on a video selected for upload
//! - `JobObserver` - Progress notifications for front ends

mod account_store;
mod content_posting;
mod job_observer;
mod oauth;
mod video_payload;
mod video_uploader;

pub use account_store::{AccountStore, AccountStoreError, ACCOUNTS_STORAGE_KEY};
pub use content_posting::{
    ApiError, ContentPostingApi, PostInfo, PublishInit, PublishInitRequest, PublishStatusReport,
    RemoteStatus, SourceInfo,
};
pub use job_observer::{JobObserver, NoopObserver};
pub use oauth::{OAuthTokenExchange, TokenExchangeRequest, TokenGrant};
pub use video_payload::{MediaReadError, VideoPayload};
pub use video_uploader::{ChunkReceipt, VideoUploader};
