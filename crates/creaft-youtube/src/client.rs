//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and retry with back-off on transient failures. Quota exhaustion is
//! detected from the error envelope and surfaced as
//! [`YoutubeError::QuotaExceeded`] so callers can stop collecting instead
//! of burning the remaining budget on retries.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use creaft_core::ContentRecord;
use reqwest::{Client, StatusCode, Url};

use crate::error::YoutubeError;
use crate::normalize::{normalize_channel, normalize_video};
use crate::retry::retry_with_backoff;
use crate::types::{ApiErrorEnvelope, ChannelInfo, ChannelListResponse, SearchListResponse, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// The API caps both page sizes and `videos.list` id batches at 50.
const MAX_PAGE_SIZE: u32 = 50;
const DETAILS_CHUNK: usize = 50;

/// Result ordering for keyword search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchOrder {
    #[default]
    Relevance,
    Date,
    ViewCount,
    Rating,
}

impl SearchOrder {
    fn as_param(self) -> &'static str {
        match self {
            SearchOrder::Relevance => "relevance",
            SearchOrder::Date => "date",
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Rating => "rating",
        }
    }
}

/// Client for the YouTube Data API.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production YouTube API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creaft/0.1 (content-analytics)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the default retry policy (3 retries, 1 s base back-off).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the current most-popular chart for a region, optionally
    /// filtered to one category, and normalizes each video.
    ///
    /// `max_results` is capped at the API page limit of 50.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] when the daily quota is spent.
    /// - [`YoutubeError::ApiError`] on other API-level errors.
    /// - [`YoutubeError::Http`] on network failure after retries.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn trending_videos(
        &self,
        region: &str,
        category_id: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<ContentRecord>, YoutubeError> {
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_trending_page(region, category_id, max_results)
        })
        .await?;

        let records: Vec<ContentRecord> = response
            .items
            .iter()
            .filter_map(normalize_video)
            .collect();
        tracing::info!(region, count = records.len(), "fetched trending videos");
        Ok(records)
    }

    /// Searches for videos by keyword and hydrates each hit with full
    /// details, so the returned records carry statistics and duration.
    ///
    /// Non-video search hits and hits without a video id are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::trending_videos`].
    pub async fn search_videos(
        &self,
        keyword: &str,
        published_after: Option<DateTime<Utc>>,
        order: SearchOrder,
        max_results: u32,
    ) -> Result<Vec<ContentRecord>, YoutubeError> {
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_search_page(keyword, published_after, order, max_results)
        })
        .await?;

        let video_ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.videos_details(&video_ids).await?;
        tracing::info!(keyword, count = records.len(), "search results hydrated");
        Ok(records)
    }

    /// Fetches full details for a list of video ids, in API-limit chunks
    /// of 50, and normalizes each video.
    ///
    /// Ids the API does not return (deleted or private videos) are simply
    /// absent from the result.
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::trending_videos`].
    pub async fn videos_details(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<ContentRecord>, YoutubeError> {
        let mut records = Vec::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(DETAILS_CHUNK) {
            let ids = chunk.join(",");
            let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                self.fetch_videos_page(&ids)
            })
            .await?;
            records.extend(response.items.iter().filter_map(normalize_video));
        }
        Ok(records)
    }

    /// Fetches channel metadata and statistics for one channel id.
    ///
    /// Returns `Ok(None)` when the API knows no such channel.
    ///
    /// # Errors
    ///
    /// Same as [`YoutubeClient::trending_videos`].
    pub async fn channel_info(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelInfo>, YoutubeError> {
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_channel_page(channel_id)
        })
        .await?;

        Ok(response.items.first().map(normalize_channel))
    }

    async fn fetch_trending_page(
        &self,
        region: &str,
        category_id: Option<&str>,
        max_results: u32,
    ) -> Result<VideoListResponse, YoutubeError> {
        let page_size = max_results.min(MAX_PAGE_SIZE).to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails,statistics"),
            ("chart", "mostPopular"),
            ("regionCode", region),
            ("maxResults", &page_size),
        ];
        if let Some(category) = category_id {
            params.push(("videoCategoryId", category));
        }

        let url = self.build_url("videos", &params)?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: format!("videos(chart=mostPopular, region={region})"),
            source: e,
        })
    }

    async fn fetch_search_page(
        &self,
        keyword: &str,
        published_after: Option<DateTime<Utc>>,
        order: SearchOrder,
        max_results: u32,
    ) -> Result<SearchListResponse, YoutubeError> {
        let page_size = max_results.min(MAX_PAGE_SIZE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("q", keyword),
            ("type", "video"),
            ("order", order.as_param()),
            ("maxResults", &page_size),
        ];
        // Bind the owned string outside the if block so the borrow lives long enough.
        let after;
        if let Some(cutoff) = published_after {
            after = cutoff.to_rfc3339_opts(SecondsFormat::Secs, true);
            params.push(("publishedAfter", &after));
        }

        let url = self.build_url("search", &params)?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: format!("search(q={keyword})"),
            source: e,
        })
    }

    async fn fetch_videos_page(&self, ids: &str) -> Result<VideoListResponse, YoutubeError> {
        let url = self.build_url(
            "videos",
            &[("part", "snippet,contentDetails,statistics"), ("id", ids)],
        )?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: format!("videos(id={ids})"),
            source: e,
        })
    }

    async fn fetch_channel_page(
        &self,
        channel_id: &str,
    ) -> Result<ChannelListResponse, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[("part", "snippet,statistics"), ("id", channel_id)],
        )?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: format!("channels(id={channel_id})"),
            source: e,
        })
    }

    /// Builds the full endpoint URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::ApiError(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// 5xx statuses surface as [`YoutubeError::Http`] (retriable); 4xx
    /// statuses are classified from the error envelope into
    /// [`YoutubeError::QuotaExceeded`] or [`YoutubeError::ApiError`].
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status.is_server_error() {
            response.error_for_status_ref()?;
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_client_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Maps a 4xx error body onto the client error taxonomy.
///
/// Quota exhaustion arrives as HTTP 403 with reason `quotaExceeded` or
/// `dailyLimitExceeded` in the error envelope.
fn classify_client_error(status: StatusCode, body: &str) -> YoutubeError {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        let quota = envelope
            .error
            .errors
            .iter()
            .any(|detail| matches!(detail.reason.as_str(), "quotaExceeded" | "dailyLimitExceeded"));
        if quota {
            return YoutubeError::QuotaExceeded(envelope.error.message);
        }
        return YoutubeError::ApiError(format!("{status}: {}", envelope.error.message));
    }
    YoutubeError::ApiError(format!("{status}: unrecognized error body"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("videos", &[("chart", "mostPopular"), ("regionCode", "US")])
            .expect("valid endpoint");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?chart=mostPopular&regionCode=US&key=test-key"
        );
    }

    #[test]
    fn build_url_keeps_base_path_segments() {
        let client = test_client("http://127.0.0.1:9999/youtube/v3/");
        let url = client
            .build_url("search", &[("q", "cats")])
            .expect("valid endpoint");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/youtube/v3/search?q=cats&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("search", &[("q", "cats & dogs")])
            .expect("valid endpoint");
        assert!(
            url.as_str().contains("cats+%26+dogs") || url.as_str().contains("cats%20%26%20dogs"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn classify_detects_quota_exhaustion() {
        let body = r#"{"error": {"code": 403, "message": "quota exceeded", "errors": [{"reason": "quotaExceeded"}]}}"#;
        let err = classify_client_error(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, YoutubeError::QuotaExceeded(_)));
    }

    #[test]
    fn classify_falls_back_to_api_error() {
        let body = r#"{"error": {"code": 400, "message": "bad request", "errors": [{"reason": "invalidParameter"}]}}"#;
        let err = classify_client_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, YoutubeError::ApiError(_)));
    }

    #[test]
    fn search_order_params_match_api_values() {
        assert_eq!(SearchOrder::Relevance.as_param(), "relevance");
        assert_eq!(SearchOrder::ViewCount.as_param(), "viewCount");
    }
}
