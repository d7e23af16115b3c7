//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use creaft_youtube::{SearchOrder, YoutubeClient, YoutubeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(0, 0)
}

fn video_item(id: &str, views: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "snippet": {
            "publishedAt": "2025-06-01T12:00:00Z",
            "channelId": "UC123",
            "title": format!("Video {id}"),
            "description": "A description",
            "channelTitle": "A Channel",
            "thumbnails": { "high": { "url": "https://i.ytimg.com/x.jpg" } },
            "tags": ["one", "two"],
            "categoryId": "24"
        },
        "contentDetails": { "duration": "PT4M13S" },
        "statistics": {
            "viewCount": views,
            "likeCount": "100",
            "commentCount": "10"
        }
    })
}

#[tokio::test]
async fn trending_videos_are_fetched_and_normalized() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [video_item("abc123", "50000"), video_item("def456", "8000")]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("chart", "mostPopular"))
        .and(query_param("regionCode", "US"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .trending_videos("US", None, 50)
        .await
        .expect("should parse trending videos");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].video_id, "abc123");
    assert_eq!(records[0].views, 50_000);
    assert_eq!(records[0].duration_seconds, 253);
    assert_eq!(records[0].duration_display, "4:13");
    assert_eq!(records[1].video_id, "def456");
}

#[tokio::test]
async fn trending_respects_category_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("videoCategoryId", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "items": [video_item("music1", "1")] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .trending_videos("US", Some("10"), 10)
        .await
        .expect("should parse trending videos");
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn search_chains_into_details_lookup() {
    let server = MockServer::start().await;

    let search_body = serde_json::json!({
        "items": [
            { "id": { "kind": "youtube#video", "videoId": "hit1" } },
            { "id": { "kind": "youtube#channel" } },
            { "id": { "kind": "youtube#video", "videoId": "hit2" } }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust tutorial"))
        .and(query_param("order", "viewCount"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body))
        .mount(&server)
        .await;

    let details_body = serde_json::json!({
        "items": [video_item("hit1", "100"), video_item("hit2", "200")]
    });
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "hit1,hit2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&details_body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .search_videos("rust tutorial", None, SearchOrder::ViewCount, 50)
        .await
        .expect("should hydrate search hits");

    assert_eq!(records.len(), 2, "channel hit should be skipped");
    assert_eq!(records[0].video_id, "hit1");
    assert_eq!(records[1].views, 200);
}

#[tokio::test]
async fn search_with_no_hits_skips_details_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .search_videos("nothing", None, SearchOrder::Relevance, 50)
        .await
        .expect("empty search should succeed");
    assert!(records.is_empty());
}

#[tokio::test]
async fn channel_info_returns_parsed_channel() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [{
            "id": "UC123",
            "snippet": {
                "title": "A Channel",
                "description": "About the channel",
                "customUrl": "@achannel",
                "thumbnails": { "high": { "url": "https://i.ytimg.com/c.jpg" } }
            },
            "statistics": {
                "subscriberCount": "12000",
                "videoCount": "340",
                "viewCount": "9000000"
            }
        }]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let channel = client
        .channel_info("UC123")
        .await
        .expect("should parse channel")
        .expect("channel should exist");

    assert_eq!(channel.title, "A Channel");
    assert_eq!(channel.subscriber_count, 12_000);
    assert_eq!(channel.custom_url.as_deref(), Some("@achannel"));
}

#[tokio::test]
async fn unknown_channel_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let channel = client
        .channel_info("UCnothing")
        .await
        .expect("empty channel list should succeed");
    assert!(channel.is_none());
}

#[tokio::test]
async fn quota_exhaustion_maps_to_quota_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [{ "reason": "quotaExceeded", "domain": "youtube.quota" }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(3, 0);
    let result = client.trending_videos("US", None, 50).await;

    assert!(
        matches!(result, Err(YoutubeError::QuotaExceeded(_))),
        "403 quotaExceeded must map to QuotaExceeded and not be retried"
    );
}

#[tokio::test]
async fn non_quota_api_error_surfaces_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 400,
            "message": "Invalid region code.",
            "errors": [{ "reason": "invalidRegionCode" }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .trending_videos("ZZ", None, 50)
        .await
        .expect_err("400 should be an error");

    let msg = err.to_string();
    assert!(
        msg.contains("Invalid region code"),
        "expected API message in error, got: {msg}"
    );
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "items": [video_item("ok1", "7")] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(3, 1);
    let records = client
        .trending_videos("US", None, 50)
        .await
        .expect("should succeed after retries");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].video_id, "ok1");
}
