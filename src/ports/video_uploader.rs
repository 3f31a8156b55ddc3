//! Video Uploader Port - transmits one byte range to TikTok's upload target.

use async_trait::async_trait;
use bytes::Bytes;

use super::ApiError;
use crate::domain::publish::ByteRange;

/// Port for PUTting video chunks to the URL returned by publish init.
#[async_trait]
pub trait VideoUploader: Send + Sync {
    /// Sends one chunk with a `Content-Range` header describing `range`.
    ///
    /// Only transport failures are errors; the HTTP status is returned in
    /// the receipt for the caller to inspect.
    async fn put_chunk(
        &self,
        upload_url: &str,
        range: ByteRange,
        body: Bytes,
    ) -> Result<ChunkReceipt, ApiError>;
}

/// What the upload target answered for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkReceipt {
    pub status: u16,
}

impl ChunkReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
