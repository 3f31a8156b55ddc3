//! Local video file adapter.
//!
//! Only the size is read up front. Each chunk is read with a fresh handle at
//! upload time so a multi-gigabyte file never sits in memory.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::ports::{MediaReadError, VideoPayload};

/// A video file selected from disk.
#[derive(Debug, Clone)]
pub struct LocalVideoFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl LocalVideoFile {
    /// Opens `path` and records its size.
    ///
    /// # Errors
    ///
    /// Returns `MediaReadError::Open` if the path is missing or not a file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, MediaReadError> {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = fs::metadata(&path).await.map_err(|e| MediaReadError::Open {
            name: name.clone(),
            message: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(MediaReadError::Open {
                name,
                message: "not a regular file".to_string(),
            });
        }

        Ok(Self {
            path,
            name,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VideoPayload for LocalVideoFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read_range(&self, start: u64, len: u64) -> Result<Bytes, MediaReadError> {
        let read_error = |message: String| MediaReadError::Read {
            name: self.name.clone(),
            start,
            end: start + len,
            message,
        };

        let mut file = File::open(&self.path)
            .await
            .map_err(|e| read_error(e.to_string()))?;
        file.seek(SeekFrom::Start(start))
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let len = usize::try_from(len).map_err(|e| read_error(e.to_string()))?;
        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)
            .await
            .map_err(|e| read_error(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}
