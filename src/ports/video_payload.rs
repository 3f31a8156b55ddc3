//! Video Payload Port - a readable handle on the binary being published.
//!
//! Jobs hold the payload by handle only; bytes are read chunk by chunk
//! during upload so large files never sit fully in memory.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

/// Errors reading from a video payload.
#[derive(Debug, thiserror::Error)]
pub enum MediaReadError {
    #[error("Failed to open {name}: {message}")]
    Open { name: String, message: String },

    #[error("Failed to read bytes {start}..{end} of {name}: {message}")]
    Read {
        name: String,
        start: u64,
        end: u64,
        message: String,
    },
}

/// Port for a video file selected for FILE_UPLOAD.
#[async_trait]
pub trait VideoPayload: Send + Sync + fmt::Debug {
    /// Display name (usually the file name).
    fn name(&self) -> &str;

    /// Total size in bytes.
    fn size(&self) -> u64;

    /// Reads `len` bytes starting at `start`.
    async fn read_range(&self, start: u64, len: u64) -> Result<Bytes, MediaReadError>;
}
