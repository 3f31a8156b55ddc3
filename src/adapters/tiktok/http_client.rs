//! TikTok HTTP client - reqwest implementation of the TikTok ports.
//!
//! One client serves the Content Posting calls, the chunk PUTs to the upload
//! target and the OAuth token exchange.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TikTokClientConfig::new()
//!     .with_base_url("http://localhost:3000")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = TikTokHttpClient::new(config)?;
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_RANGE, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::wire::{decode_envelope, decode_oauth};
use crate::domain::account::{BearerToken, CreatorInfo};
use crate::domain::foundation::PublishId;
use crate::domain::publish::ByteRange;
use crate::ports::{
    ApiError, ChunkReceipt, ContentPostingApi, OAuthTokenExchange, PublishInit,
    PublishInitRequest, PublishStatusReport, TokenExchangeRequest, TokenGrant, VideoUploader,
};

/// Production API origin.
pub const DEFAULT_API_BASE_URL: &str = "https://open.tiktokapis.com";

const CREATOR_INFO_PATH: &str = "/v2/post/publish/creator_info/query/";
const PUBLISH_INIT_PATH: &str = "/v2/post/publish/video/init/";
const PUBLISH_STATUS_PATH: &str = "/v2/post/publish/status/fetch/";
const OAUTH_TOKEN_PATH: &str = "/v2/oauth/token/";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Configuration for the TikTok client.
#[derive(Debug, Clone)]
pub struct TikTokClientConfig {
    /// Origin the `/v2/...` paths are appended to.
    pub base_url: String,
    /// Per-request timeout, chunk PUTs included.
    pub timeout: Duration,
}

impl TikTokClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TikTokClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct StatusFetchBody<'a> {
    publish_id: &'a str,
}

/// reqwest-backed TikTok client.
#[derive(Debug, Clone)]
pub struct TikTokHttpClient {
    config: TikTokClientConfig,
    client: Client,
}

impl TikTokHttpClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: TikTokClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TikTokClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::transport(format!(
                "Request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if e.is_connect() {
            ApiError::transport(format!("Connection failed: {}", e))
        } else {
            ApiError::transport(e.to_string())
        }
    }

    /// Sends a Content Posting request and decodes its envelope.
    ///
    /// The HTTP status is not consulted; TikTok reports failures in the
    /// envelope's `error.code`.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;

        tracing::debug!(path, status = status.as_u16(), "TikTok response received");

        let result = decode_envelope::<T>(&body)?.into_result();
        if let Err(ApiError::Upstream { message }) = &result {
            tracing::warn!(path, status = status.as_u16(), %message, "TikTok API error");
        }
        result
    }

    fn authorized_post(&self, path: &str, token: &BearerToken) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .bearer_auth(token.expose())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }
}

#[async_trait]
impl ContentPostingApi for TikTokHttpClient {
    async fn query_creator_info(&self, token: &BearerToken) -> Result<CreatorInfo, ApiError> {
        if token.is_empty() {
            return Err(ApiError::MissingInput("Missing token".to_string()));
        }

        tracing::debug!("Querying creator info");
        let request = self.authorized_post(CREATOR_INFO_PATH, token);
        self.send_envelope(request, CREATOR_INFO_PATH).await
    }

    async fn init_publish(
        &self,
        token: &BearerToken,
        request: &PublishInitRequest,
    ) -> Result<PublishInit, ApiError> {
        if token.is_empty() {
            return Err(ApiError::MissingInput("Missing token".to_string()));
        }

        tracing::debug!(source = %request.source_info.kind(), "Initialising publish");
        let builder = self.authorized_post(PUBLISH_INIT_PATH, token).json(request);
        self.send_envelope(builder, PUBLISH_INIT_PATH).await
    }

    async fn fetch_publish_status(
        &self,
        token: &BearerToken,
        publish_id: &PublishId,
    ) -> Result<PublishStatusReport, ApiError> {
        if token.is_empty() || publish_id.is_empty() {
            return Err(ApiError::MissingInput(
                "Missing token or publish_id".to_string(),
            ));
        }

        tracing::debug!(%publish_id, "Fetching publish status");
        let builder = self
            .authorized_post(PUBLISH_STATUS_PATH, token)
            .json(&StatusFetchBody {
                publish_id: publish_id.as_str(),
            });
        self.send_envelope(builder, PUBLISH_STATUS_PATH).await
    }
}

#[async_trait]
impl VideoUploader for TikTokHttpClient {
    async fn put_chunk(
        &self,
        upload_url: &str,
        range: ByteRange,
        body: Bytes,
    ) -> Result<ChunkReceipt, ApiError> {
        let content_range = range.content_range();
        tracing::debug!(%content_range, "Uploading chunk");

        let response = self
            .client
            .put(upload_url)
            .header(CONTENT_RANGE, content_range)
            .header(CONTENT_TYPE, VIDEO_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Ok(ChunkReceipt {
            status: response.status().as_u16(),
        })
    }
}

#[async_trait]
impl OAuthTokenExchange for TikTokHttpClient {
    async fn exchange_code(&self, request: &TokenExchangeRequest) -> Result<TokenGrant, ApiError> {
        let secret = request.client_secret.expose_secret();
        if request.code.is_empty()
            || request.client_key.is_empty()
            || secret.is_empty()
            || request.redirect_uri.is_empty()
        {
            return Err(ApiError::MissingInput("Missing required fields".to_string()));
        }

        let form = [
            ("client_key", request.client_key.as_str()),
            ("client_secret", secret.as_str()),
            ("code", request.code.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", request.redirect_uri.as_str()),
        ];

        tracing::debug!(client_key = %request.client_key, "Exchanging authorization code");
        let response = self
            .client
            .post(self.url(OAUTH_TOKEN_PATH))
            .form(&form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;

        let result = decode_oauth::<TokenGrant>(&body)?.into_result();
        if let Err(ApiError::Upstream { message }) = &result {
            tracing::warn!(%message, "Token exchange rejected");
        }
        result
    }
}
