//! Mock TikTok API for testing.
//!
//! Scripted implementation of every TikTok port so the publish pipeline can
//! run without network access.
//!
//! # Features
//!
//! - Per-endpoint response queues (consumed in order, with fallbacks)
//! - Simulated latency for in-flight edits
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockTikTokApi::new()
//!     .with_status(PublishStatusReport::new("PROCESSING_UPLOAD"))
//!     .with_status(PublishStatusReport::new("PUBLISH_COMPLETE"));
//!
//! let report = api.fetch_publish_status(&token, &publish_id).await?;
//! assert_eq!(api.status_fetch_count(), 1);
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::account::{BearerToken, CreatorInfo};
use crate::domain::foundation::PublishId;
use crate::domain::publish::ByteRange;
use crate::ports::{
    ApiError, ChunkReceipt, ContentPostingApi, OAuthTokenExchange, PublishInit,
    PublishInitRequest, PublishStatusReport, TokenExchangeRequest, TokenGrant, VideoUploader,
};

/// Upload target returned by the default init response.
pub const MOCK_UPLOAD_URL: &str = "https://upload.mock.tiktok/video/1";

/// A recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreatorInfo {
        token: String,
    },
    InitPublish {
        token: String,
        request: PublishInitRequest,
    },
    FetchStatus {
        token: String,
        publish_id: String,
    },
    PutChunk {
        upload_url: String,
        content_range: String,
        len: usize,
    },
    ExchangeCode {
        code: String,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Result<T, ApiError>>>>;

/// Scripted TikTok API.
#[derive(Debug, Clone)]
pub struct MockTikTokApi {
    creator_infos: Queue<CreatorInfo>,
    inits: Queue<PublishInit>,
    statuses: Queue<PublishStatusReport>,
    chunks: Queue<ChunkReceipt>,
    grants: Queue<TokenGrant>,
    status_fallback: PublishStatusReport,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockTikTokApi {
    fn default() -> Self {
        Self::new()
    }
}

fn queue<T>() -> Queue<T> {
    Arc::new(Mutex::new(VecDeque::new()))
}

impl MockTikTokApi {
    /// Creates a mock whose endpoints all succeed.
    pub fn new() -> Self {
        Self {
            creator_infos: queue(),
            inits: queue(),
            statuses: queue(),
            chunks: queue(),
            grants: queue(),
            status_fallback: PublishStatusReport::new("PUBLISH_COMPLETE"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creator info returned when nothing is queued.
    pub fn creator_info_fixture() -> CreatorInfo {
        CreatorInfo {
            creator_username: "mock_creator".to_string(),
            creator_nickname: "Mock Creator".to_string(),
            creator_avatar_url: "https://p16.mock.tiktok/avatar.jpeg".to_string(),
            privacy_level_options: vec![
                "PUBLIC_TO_EVERYONE".to_string(),
                "MUTUAL_FOLLOW_FRIENDS".to_string(),
                "SELF_ONLY".to_string(),
            ],
            comment_disabled: false,
            duet_disabled: false,
            stitch_disabled: true,
            max_video_post_duration_sec: 600,
        }
    }

    pub fn with_creator_info(self, result: Result<CreatorInfo, ApiError>) -> Self {
        self.creator_infos.lock().unwrap().push_back(result);
        self
    }

    pub fn with_init(self, result: Result<PublishInit, ApiError>) -> Self {
        self.inits.lock().unwrap().push_back(result);
        self
    }

    /// Queues a successful status report.
    pub fn with_status(self, report: PublishStatusReport) -> Self {
        self.with_status_result(Ok(report))
    }

    pub fn with_status_result(self, result: Result<PublishStatusReport, ApiError>) -> Self {
        self.statuses.lock().unwrap().push_back(result);
        self
    }

    /// Status report returned once the queue is drained.
    pub fn with_status_fallback(mut self, report: PublishStatusReport) -> Self {
        self.status_fallback = report;
        self
    }

    pub fn with_chunk_result(self, result: Result<ChunkReceipt, ApiError>) -> Self {
        self.chunks.lock().unwrap().push_back(result);
        self
    }

    pub fn with_grant(self, result: Result<TokenGrant, ApiError>) -> Self {
        self.grants.lock().unwrap().push_back(result);
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creator_info_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::CreatorInfo { .. }))
    }

    pub fn init_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::InitPublish { .. }))
    }

    pub fn status_fetch_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::FetchStatus { .. }))
    }

    /// Content-Range headers of the chunk PUTs, in order.
    pub fn content_ranges(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::PutChunk { content_range, .. } => Some(content_range),
                _ => None,
            })
            .collect()
    }

    /// The init requests sent so far.
    pub fn init_requests(&self) -> Vec<PublishInitRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::InitPublish { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    async fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }

    fn next<T>(queue: &Queue<T>) -> Option<Result<T, ApiError>> {
        queue.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl ContentPostingApi for MockTikTokApi {
    async fn query_creator_info(&self, token: &BearerToken) -> Result<CreatorInfo, ApiError> {
        self.record(MockCall::CreatorInfo {
            token: token.expose().to_string(),
        })
        .await;
        Self::next(&self.creator_infos).unwrap_or_else(|| Ok(Self::creator_info_fixture()))
    }

    async fn init_publish(
        &self,
        token: &BearerToken,
        request: &PublishInitRequest,
    ) -> Result<PublishInit, ApiError> {
        self.record(MockCall::InitPublish {
            token: token.expose().to_string(),
            request: request.clone(),
        })
        .await;
        Self::next(&self.inits).unwrap_or_else(|| {
            Ok(PublishInit {
                publish_id: PublishId::new("v_pub_mock_1"),
                upload_url: Some(MOCK_UPLOAD_URL.to_string()),
            })
        })
    }

    async fn fetch_publish_status(
        &self,
        token: &BearerToken,
        publish_id: &PublishId,
    ) -> Result<PublishStatusReport, ApiError> {
        self.record(MockCall::FetchStatus {
            token: token.expose().to_string(),
            publish_id: publish_id.as_str().to_string(),
        })
        .await;
        Self::next(&self.statuses).unwrap_or_else(|| Ok(self.status_fallback.clone()))
    }
}

#[async_trait]
impl VideoUploader for MockTikTokApi {
    async fn put_chunk(
        &self,
        upload_url: &str,
        range: ByteRange,
        body: Bytes,
    ) -> Result<ChunkReceipt, ApiError> {
        self.record(MockCall::PutChunk {
            upload_url: upload_url.to_string(),
            content_range: range.content_range(),
            len: body.len(),
        })
        .await;
        Self::next(&self.chunks).unwrap_or(Ok(ChunkReceipt { status: 201 }))
    }
}

#[async_trait]
impl OAuthTokenExchange for MockTikTokApi {
    async fn exchange_code(&self, request: &TokenExchangeRequest) -> Result<TokenGrant, ApiError> {
        self.record(MockCall::ExchangeCode {
            code: request.code.clone(),
        })
        .await;
        Self::next(&self.grants)
            .unwrap_or_else(|| Err(ApiError::upstream("Token exchange failed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_responses_are_consumed_in_order() {
        let api = MockTikTokApi::new()
            .with_status(PublishStatusReport::new("PROCESSING_UPLOAD"))
            .with_status(PublishStatusReport::failed("video_format"));
        let token = BearerToken::new("act.1");
        let id = PublishId::new("p1");

        let first = api.fetch_publish_status(&token, &id).await.unwrap();
        let second = api.fetch_publish_status(&token, &id).await.unwrap();
        let third = api.fetch_publish_status(&token, &id).await.unwrap();

        assert_eq!(first.status.as_deref(), Some("PROCESSING_UPLOAD"));
        assert_eq!(second.fail_reason.as_deref(), Some("video_format"));
        assert_eq!(third.status.as_deref(), Some("PUBLISH_COMPLETE"));
        assert_eq!(api.status_fetch_count(), 3);
    }

    #[tokio::test]
    async fn records_chunk_puts() {
        let api = MockTikTokApi::new();
        let range = ByteRange {
            start: 0,
            end: 9,
            total: 20,
        };
        api.put_chunk(MOCK_UPLOAD_URL, range, Bytes::from_static(&[0u8; 10]))
            .await
            .unwrap();

        assert_eq!(api.content_ranges(), vec!["bytes 0-9/20".to_string()]);
        assert_eq!(
            api.calls()[0],
            MockCall::PutChunk {
                upload_url: MOCK_UPLOAD_URL.to_string(),
                content_range: "bytes 0-9/20".to_string(),
                len: 10,
            }
        );
    }

    #[tokio::test]
    async fn queued_error_is_returned() {
        let api = MockTikTokApi::new().with_creator_info(Err(ApiError::upstream("scope_not_authorized")));
        let result = api.query_creator_info(&BearerToken::new("act.1")).await;
        assert_eq!(result, Err(ApiError::upstream("scope_not_authorized")));
        assert!(api.query_creator_info(&BearerToken::new("act.1")).await.is_ok());
    }
}
