//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `tiktok` - TikTok HTTP client and a scripted mock
//! - `storage` - Account list persistence (file, in-memory)
//! - `media` - Video payloads (local file, in-memory)

pub mod media;
pub mod storage;
pub mod tiktok;

pub use media::{InMemoryVideo, LocalVideoFile};
pub use storage::{FileAccountStore, InMemoryAccountStore};
pub use tiktok::{MockTikTokApi, TikTokClientConfig, TikTokHttpClient};
