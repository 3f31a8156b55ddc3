//! ChunkedUploader - sends a video to TikTok's upload target range by range.

use std::sync::Arc;

use crate::domain::publish::{ChunkPlan, PublishError};
use crate::ports::{VideoPayload, VideoUploader};

/// Progress after a chunk has been sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkProgress {
    /// Chunks sent so far (1-based).
    pub sent: u64,
    pub total: u64,
}

impl ChunkProgress {
    /// Overall job progress for this point of the upload: 30..=80.
    pub fn job_progress(&self) -> u8 {
        if self.total == 0 {
            return 80;
        }
        let fraction = self.sent as f64 / self.total as f64;
        30 + (fraction * 50.0).round() as u8
    }

    pub fn message(&self) -> String {
        format!("Uploading chunk {}/{}…", self.sent, self.total)
    }
}

/// Sequential chunk upload driver.
pub struct ChunkedUploader {
    uploader: Arc<dyn VideoUploader>,
}

impl ChunkedUploader {
    pub fn new(uploader: Arc<dyn VideoUploader>) -> Self {
        Self { uploader }
    }

    /// Uploads every range of `plan` in ascending order.
    ///
    /// Chunk responses with a non-2xx status are logged and the upload
    /// continues; read and transport failures abort it.
    pub async fn upload<F>(
        &self,
        file: &dyn VideoPayload,
        upload_url: &str,
        plan: &ChunkPlan,
        mut on_chunk: F,
    ) -> Result<(), PublishError>
    where
        F: FnMut(ChunkProgress) + Send,
    {
        let total = plan.total_chunks();
        for (index, range) in plan.ranges().enumerate() {
            let body = file
                .read_range(range.start, range.len())
                .await
                .map_err(|e| PublishError::Transport(e.to_string()))?;

            let receipt = self.uploader.put_chunk(upload_url, range, body).await?;
            if !receipt.is_success() {
                tracing::warn!(
                    chunk = index + 1,
                    total,
                    status = receipt.status,
                    content_range = %range,
                    "Chunk upload returned non-success status"
                );
            }

            on_chunk(ChunkProgress {
                sent: index as u64 + 1,
                total,
            });
        }

        tracing::debug!(file = file.name(), chunks = total, "Upload finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::media::InMemoryVideo;
    use crate::adapters::tiktok::{MockTikTokApi, MOCK_UPLOAD_URL};
    use crate::domain::publish::MAX_CHUNK_SIZE;
    use crate::ports::{ApiError, ChunkReceipt};

    #[test]
    fn job_progress_spans_thirty_to_eighty() {
        assert_eq!(ChunkProgress { sent: 1, total: 1 }.job_progress(), 80);
        assert_eq!(ChunkProgress { sent: 1, total: 3 }.job_progress(), 47);
        assert_eq!(ChunkProgress { sent: 2, total: 3 }.job_progress(), 63);
        assert_eq!(ChunkProgress { sent: 1, total: 4 }.job_progress(), 43);
        assert_eq!(
            ChunkProgress { sent: 2, total: 3 }.message(),
            "Uploading chunk 2/3…"
        );
    }

    #[tokio::test]
    async fn uploads_ranges_in_order_with_progress() {
        let api = MockTikTokApi::new();
        let uploader = ChunkedUploader::new(Arc::new(api.clone()));
        let size = (2 * MAX_CHUNK_SIZE + 5) as usize;
        let video = InMemoryVideo::zeroed("big.mp4", size);
        let plan = ChunkPlan::for_size(size as u64);
        let mut seen = Vec::new();

        uploader
            .upload(&video, MOCK_UPLOAD_URL, &plan, |p| seen.push(p.job_progress()))
            .await
            .unwrap();

        assert_eq!(
            api.content_ranges(),
            vec![
                format!("bytes 0-10485759/{}", size),
                format!("bytes 10485760-20971519/{}", size),
                format!("bytes 20971520-20971524/{}", size),
            ]
        );
        assert_eq!(seen, vec![47, 63, 80]);
    }

    #[tokio::test]
    async fn non_success_chunk_status_does_not_abort() {
        let api = MockTikTokApi::new().with_chunk_result(Ok(ChunkReceipt { status: 500 }));
        let uploader = ChunkedUploader::new(Arc::new(api.clone()));
        let video = InMemoryVideo::zeroed("clip.mp4", 20_000);

        let result = uploader
            .upload(&video, MOCK_UPLOAD_URL, &ChunkPlan::for_size(20_000), |_| {})
            .await;

        assert!(result.is_ok());
        assert_eq!(api.content_ranges(), vec!["bytes 0-19999/20000".to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_aborts() {
        let api = MockTikTokApi::new()
            .with_chunk_result(Err(ApiError::transport("Connection failed: reset")));
        let uploader = ChunkedUploader::new(Arc::new(api.clone()));
        let size = (MAX_CHUNK_SIZE + 1) as usize;
        let video = InMemoryVideo::zeroed("clip.mp4", size);

        let result = uploader
            .upload(&video, MOCK_UPLOAD_URL, &ChunkPlan::for_size(size as u64), |_| {})
            .await;

        assert_eq!(
            result,
            Err(PublishError::Transport("Connection failed: reset".to_string()))
        );
        assert_eq!(api.content_ranges().len(), 1);
    }
}
