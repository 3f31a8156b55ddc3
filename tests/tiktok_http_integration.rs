//! Integration tests for the reqwest TikTok client.
//!
//! These tests run the client against a local wiremock server and check:
//! 1. Requests carry the headers and bodies TikTok expects
//! 2. Envelope and OAuth replies decode into data or upstream errors
//! 3. A whole publish runs over HTTP end to end

use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tikpublish::adapters::{InMemoryAccountStore, InMemoryVideo, TikTokClientConfig, TikTokHttpClient};
use tikpublish::application::{AccountBook, PublishOrchestrator, PublishOutcome, StatusPoller};
use tikpublish::domain::account::BearerToken;
use tikpublish::domain::foundation::PublishId;
use tikpublish::domain::publish::{ByteRange, JobStatus, PublishJob};
use tikpublish::ports::{
    ApiError, ContentPostingApi, OAuthTokenExchange, PostInfo, PublishInitRequest, SourceInfo,
    TokenExchangeRequest, VideoUploader,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn client_for(server: &MockServer) -> TikTokHttpClient {
    TikTokHttpClient::new(
        TikTokClientConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "data": data,
        "error": { "code": "ok", "message": "", "log_id": "202410160000" }
    })
}

fn creator_info_data() -> serde_json::Value {
    json!({
        "creator_avatar_url": "https://p16.tiktokcdn.com/a.jpeg",
        "creator_username": "studio_main",
        "creator_nickname": "Studio Main",
        "privacy_level_options": ["PUBLIC_TO_EVERYONE", "SELF_ONLY"],
        "comment_disabled": false,
        "duet_disabled": true,
        "stitch_disabled": false,
        "max_video_post_duration_sec": 300
    })
}

// =============================================================================
// Content Posting
// =============================================================================

#[tokio::test]
async fn creator_info_sends_bearer_token_and_decodes_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/creator_info/query/"))
        .and(header("authorization", "Bearer act.main"))
        .and(header("content-type", "application/json; charset=UTF-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(creator_info_data())))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server)
        .query_creator_info(&BearerToken::new("act.main"))
        .await
        .unwrap();

    assert_eq!(info.creator_username, "studio_main");
    assert_eq!(info.privacy_level_options, vec!["PUBLIC_TO_EVERYONE", "SELF_ONLY"]);
    assert!(info.duet_disabled);
    assert_eq!(info.max_video_post_duration_sec, 300);
}

#[tokio::test]
async fn error_envelope_surfaces_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/creator_info/query/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "data": {},
            "error": {
                "code": "access_token_invalid",
                "message": "The access token is invalid or not found in the request.",
                "log_id": "202410160001"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .query_creator_info(&BearerToken::new("act.expired"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::upstream("The access token is invalid or not found in the request.")
    );
}

#[tokio::test]
async fn error_envelope_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/video/init/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": "invalid_params", "message": "" }
        })))
        .mount(&server)
        .await;

    let request = PublishInitRequest {
        post_info: PostInfo {
            title: "t".to_string(),
            privacy_level: "SELF_ONLY".to_string(),
            disable_duet: false,
            disable_comment: false,
            disable_stitch: false,
            video_cover_timestamp_ms: 1000,
        },
        source_info: SourceInfo::pull_from_url("https://cdn.example.com/v.mp4"),
    };
    let err = client_for(&server)
        .init_publish(&BearerToken::new("act.main"), &request)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::upstream("TikTok API error"));
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/creator_info/query/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .query_creator_info(&BearerToken::new("act.main"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "expected transport error, got {:?}", err);
    assert!(err.to_string().starts_with("Malformed TikTok response"));
}

#[tokio::test]
async fn init_sends_post_and_source_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/video/init/"))
        .and(body_json(json!({
            "post_info": {
                "title": "Launch day #fyp",
                "privacy_level": "PUBLIC_TO_EVERYONE",
                "disable_duet": false,
                "disable_comment": true,
                "disable_stitch": false,
                "video_cover_timestamp_ms": 1000
            },
            "source_info": {
                "source": "FILE_UPLOAD",
                "video_size": 30000,
                "chunk_size": 30000,
                "total_chunk_count": 1
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "publish_id": "v_inbox_file~v2.123",
            "upload_url": "https://open-upload.tiktokapis.com/video/?upload_id=1"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let request = PublishInitRequest {
        post_info: PostInfo {
            title: "Launch day #fyp".to_string(),
            privacy_level: "PUBLIC_TO_EVERYONE".to_string(),
            disable_duet: false,
            disable_comment: true,
            disable_stitch: false,
            video_cover_timestamp_ms: 1000,
        },
        source_info: SourceInfo::FileUpload {
            video_size: 30_000,
            chunk_size: 30_000,
            total_chunk_count: 1,
        },
    };
    let init = client_for(&server)
        .init_publish(&BearerToken::new("act.main"), &request)
        .await
        .unwrap();

    assert_eq!(init.publish_id, PublishId::new("v_inbox_file~v2.123"));
    assert_eq!(
        init.upload_url.as_deref(),
        Some("https://open-upload.tiktokapis.com/video/?upload_id=1")
    );
}

#[tokio::test]
async fn status_fetch_posts_publish_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/status/fetch/"))
        .and(body_json(json!({ "publish_id": "v_pub_9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "status": "FAILED",
            "fail_reason": "video_format"
        }))))
        .mount(&server)
        .await;

    let report = client_for(&server)
        .fetch_publish_status(&BearerToken::new("act.main"), &PublishId::new("v_pub_9"))
        .await
        .unwrap();

    assert_eq!(report.status.as_deref(), Some("FAILED"));
    assert_eq!(report.fail_reason.as_deref(), Some("video_format"));
}

// =============================================================================
// Upload and OAuth
// =============================================================================

#[tokio::test]
async fn chunk_put_sets_content_range() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/upload/1"))
        .and(header("content-range", "bytes 10485760-20971519/25000000"))
        .and(header("content-type", "video/mp4"))
        .respond_with(ResponseTemplate::new(206))
        .expect(1)
        .mount(&server)
        .await;

    let range = ByteRange {
        start: 10_485_760,
        end: 20_971_519,
        total: 25_000_000,
    };
    let receipt = client_for(&server)
        .put_chunk(
            &format!("{}/upload/1", server.uri()),
            range,
            Bytes::from(vec![0u8; 16]),
        )
        .await
        .unwrap();

    assert_eq!(receipt.status, 206);
}

#[tokio::test]
async fn token_exchange_posts_form_and_decodes_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/oauth/token/"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "act.fresh",
            "expires_in": 86400,
            "open_id": "open-1",
            "refresh_expires_in": 31536000,
            "refresh_token": "rft.fresh",
            "scope": "user.info.basic,video.publish",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TokenExchangeRequest::new("auth-code-1", "key-1", "secret-1", "https://app/cb");
    let grant = client_for(&server).exchange_code(&request).await.unwrap();

    assert_eq!(grant.access_token.expose(), "act.fresh");
    assert_eq!(grant.open_id, "open-1");
}

#[tokio::test]
async fn token_exchange_error_prefers_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/oauth/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Authorization code is expired.",
            "log_id": "202410160002"
        })))
        .mount(&server)
        .await;

    let request = TokenExchangeRequest::new("stale", "key-1", "secret-1", "https://app/cb");
    let err = client_for(&server).exchange_code(&request).await.unwrap_err();

    assert_eq!(err, ApiError::upstream("Authorization code is expired."));
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn file_job_publishes_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/creator_info/query/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(creator_info_data())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/video/init/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "publish_id": "v_pub_e2e",
            "upload_url": format!("{}/upload/e2e", server.uri())
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/upload/e2e"))
        .and(header("content-range", "bytes 0-29999/30000"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/post/publish/status/fetch/"))
        .and(body_json(json!({ "publish_id": "v_pub_e2e" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "status": "PUBLISH_COMPLETE"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));
    let book = AccountBook::load(Arc::new(InMemoryAccountStore::new()))
        .await
        .into_shared();
    let id = book.write().await.add("Studio", "act.main").await;
    let account = book.read().await.get(&id).cloned().unwrap();

    let orchestrator = PublishOrchestrator::new(client.clone(), client.clone(), book.clone())
        .with_poller(StatusPoller::new(client).with_interval(Duration::ZERO));
    let mut job = PublishJob::new(Some(&account));
    job.set_title("Launch day #fyp").unwrap();
    job.use_file(Arc::new(InMemoryVideo::zeroed("launch.mp4", 30_000)))
        .unwrap();

    let outcome = orchestrator.publish(&mut job).await.unwrap();

    assert_eq!(outcome, PublishOutcome::Published);
    assert_eq!(job.status(), JobStatus::Done);
    assert_eq!(job.publish_id(), Some(&PublishId::new("v_pub_e2e")));
    let stored = book.read().await.get(&id).cloned().unwrap();
    assert_eq!(
        stored.creator_info().map(|c| c.creator_username.as_str()),
        Some("studio_main")
    );
}
