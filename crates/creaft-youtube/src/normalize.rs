//! Conversion from raw API resources to normalized records.
//!
//! Normalization is lenient: malformed timestamps and counters degrade to
//! `None`/zero rather than failing the batch. Only a missing video id drops
//! the resource, since a record without an identity cannot be stored.

use chrono::{DateTime, Utc};
use creaft_core::ContentRecord;
use creaft_scoring::{format_duration, parse_duration};

use crate::types::{ChannelInfo, ChannelResource, VideoResource};

/// Normalizes one `videos.list` resource into a [`ContentRecord`].
///
/// Returns `None` when the resource carries no video id.
#[must_use]
pub fn normalize_video(resource: &VideoResource) -> Option<ContentRecord> {
    if resource.id.is_empty() {
        tracing::warn!("skipping video resource without an id");
        return None;
    }

    let snippet = &resource.snippet;
    let duration_seconds = parse_duration(&resource.content_details.duration);

    Some(ContentRecord {
        video_id: resource.id.clone(),
        url: format!("https://www.youtube.com/watch?v={}", resource.id),
        title: snippet.title.clone(),
        description: snippet.description.clone(),
        channel_id: snippet.channel_id.clone(),
        channel_title: snippet.channel_title.clone(),
        published_at: snippet.published_at.as_deref().and_then(parse_timestamp),
        thumbnail_url: snippet.thumbnails.high.as_ref().map(|t| t.url.clone()),
        duration_seconds,
        duration_display: format_duration(duration_seconds),
        category_id: snippet.category_id.clone(),
        tags: snippet.tags.clone(),
        views: parse_counter(resource.statistics.view_count.as_deref()),
        likes: parse_counter(resource.statistics.like_count.as_deref()),
        comments: parse_counter(resource.statistics.comment_count.as_deref()),
    })
}

/// Normalizes one `channels.list` resource.
#[must_use]
pub fn normalize_channel(resource: &ChannelResource) -> ChannelInfo {
    ChannelInfo {
        id: resource.id.clone(),
        title: resource.snippet.title.clone(),
        description: resource.snippet.description.clone(),
        custom_url: resource.snippet.custom_url.clone(),
        thumbnail_url: resource
            .snippet
            .thumbnails
            .high
            .as_ref()
            .map(|t| t.url.clone()),
        subscriber_count: parse_counter(resource.statistics.subscriber_count.as_deref()),
        video_count: parse_counter(resource.statistics.video_count.as_deref()),
        view_count: parse_counter(resource.statistics.view_count.as_deref()),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Decimal-string counter to integer; absent or malformed reads as 0.
fn parse_counter(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use crate::types::{ContentDetails, Snippet, Statistics, Thumbnail, Thumbnails};

    use super::*;

    fn resource() -> VideoResource {
        VideoResource {
            id: "dQw4w9WgXcQ".to_owned(),
            snippet: Snippet {
                published_at: Some("2025-06-01T12:00:00Z".to_owned()),
                channel_id: "UC123".to_owned(),
                title: "A video".to_owned(),
                description: "About something".to_owned(),
                channel_title: "A channel".to_owned(),
                thumbnails: Thumbnails {
                    high: Some(Thumbnail {
                        url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_owned(),
                    }),
                },
                tags: vec!["music".to_owned()],
                category_id: "10".to_owned(),
            },
            content_details: ContentDetails {
                duration: "PT3M32S".to_owned(),
            },
            statistics: Statistics {
                view_count: Some("1000000".to_owned()),
                like_count: Some("50000".to_owned()),
                comment_count: None,
            },
        }
    }

    #[test]
    fn normalizes_full_resource() {
        let record = normalize_video(&resource()).expect("has an id");
        assert_eq!(record.video_id, "dQw4w9WgXcQ");
        assert_eq!(record.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(record.duration_seconds, 212);
        assert_eq!(record.duration_display, "3:32");
        assert_eq!(record.views, 1_000_000);
        assert_eq!(record.likes, 50_000);
        assert_eq!(record.comments, 0, "withheld counter reads as 0");
        assert!(record.published_at.is_some());
    }

    #[test]
    fn missing_id_drops_the_resource() {
        let mut r = resource();
        r.id = String::new();
        assert!(normalize_video(&r).is_none());
    }

    #[test]
    fn malformed_timestamp_reads_as_none() {
        let mut r = resource();
        r.snippet.published_at = Some("yesterday".to_owned());
        let record = normalize_video(&r).expect("has an id");
        assert!(record.published_at.is_none());
    }

    #[test]
    fn malformed_counter_reads_as_zero() {
        let mut r = resource();
        r.statistics.view_count = Some("lots".to_owned());
        let record = normalize_video(&r).expect("has an id");
        assert_eq!(record.views, 0);
    }

    #[test]
    fn garbage_duration_reads_as_zero_seconds() {
        let mut r = resource();
        r.content_details.duration = "3m32s".to_owned();
        let record = normalize_video(&r).expect("has an id");
        assert_eq!(record.duration_seconds, 0);
        assert_eq!(record.duration_display, "0:00");
    }
}
