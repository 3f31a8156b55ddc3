//! Chunk arithmetic for TikTok's FILE_UPLOAD source.

use std::fmt;

/// Largest chunk sent in a single PUT (10 MiB).
pub const MAX_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// How a video of a given size is split for upload.
///
/// Files under 10 MiB go up as a single chunk; larger files use fixed
/// 10 MiB chunks with a truncated tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    video_size: u64,
    chunk_size: u64,
    total_chunks: u64,
}

impl ChunkPlan {
    pub fn for_size(video_size: u64) -> Self {
        let chunk_size = if video_size < MAX_CHUNK_SIZE {
            video_size
        } else {
            MAX_CHUNK_SIZE
        };
        let total_chunks = if chunk_size == 0 {
            0
        } else {
            video_size.div_ceil(chunk_size)
        };
        Self {
            video_size,
            chunk_size,
            total_chunks,
        }
    }

    pub fn video_size(&self) -> u64 {
        self.video_size
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    /// Byte range of chunk `index`, or `None` past the last chunk.
    pub fn range(&self, index: u64) -> Option<ByteRange> {
        if index >= self.total_chunks {
            return None;
        }
        let start = index * self.chunk_size;
        let end = (start + self.chunk_size).min(self.video_size) - 1;
        Some(ByteRange {
            start,
            end,
            total: self.video_size,
        })
    }

    /// All chunk ranges in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = ByteRange> + '_ {
        (0..self.total_chunks).filter_map(move |i| self.range(i))
    }
}

/// Inclusive byte range of one chunk within a video of `total` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Byte count; zero when `end` precedes `start`.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Value for the `Content-Range` header.
    pub fn content_range(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes {}-{}/{}", self.start, self.end, self.total)
    }
}
