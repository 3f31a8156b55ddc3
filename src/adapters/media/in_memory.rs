//! In-memory video payload.

use async_trait::async_trait;
use bytes::Bytes;

use crate::ports::{MediaReadError, VideoPayload};

/// Video bytes held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryVideo {
    name: String,
    data: Bytes,
}

impl InMemoryVideo {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// A zero-filled video of `size` bytes.
    pub fn zeroed(name: impl Into<String>, size: usize) -> Self {
        Self::new(name, vec![0u8; size])
    }
}

#[async_trait]
impl VideoPayload for InMemoryVideo {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    async fn read_range(&self, start: u64, len: u64) -> Result<Bytes, MediaReadError> {
        let end = start + len;
        if end > self.size() {
            return Err(MediaReadError::Read {
                name: self.name.clone(),
                start,
                end,
                message: format!("payload is only {} bytes", self.size()),
            });
        }
        // Bytes::slice shares the buffer
        Ok(self.data.slice(start as usize..end as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slices_requested_range() {
        let video = InMemoryVideo::new("a.mp4", (0u8..100).collect::<Vec<_>>());
        let bytes = video.read_range(10, 5).await.unwrap();
        assert_eq!(bytes.as_ref(), &[10, 11, 12, 13, 14]);
    }

    #[tokio::test]
    async fn out_of_bounds_read_fails() {
        let video = InMemoryVideo::zeroed("a.mp4", 10);
        assert!(video.read_range(5, 6).await.is_err());
    }
}
