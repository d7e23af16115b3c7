//! Domain types for collected content and its engagement measurements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collected piece of video content, normalized from the platform API.
///
/// Immutable once collected: scoring reads it, re-collection overwrites it
/// wholesale (no versioning). Counters reflect the values observed at
/// collection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Platform video id (unique per content item).
    pub video_id: String,
    /// Public watch URL.
    pub url: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    /// Publish timestamp in UTC. `None` when the platform omitted it.
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    /// Duration in seconds, decoded from the platform's compact encoding.
    pub duration_seconds: i64,
    /// Human display form (`M:SS` or `H:MM:SS`).
    pub duration_display: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// A point-in-time engagement measurement for one content record.
///
/// Multiple snapshots per record form a time series; "latest" is the maximum
/// `measured_at`. Rate fields derived from these counters (engagement rate,
/// view rate, completion rate) are convenience caches only; they must be
/// recomputed from the counters, never trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub impressions: u64,
    /// Video starts; denominator for completion rate.
    #[serde(default)]
    pub plays: u64,
    /// Views that reached the 30-second mark.
    #[serde(default)]
    pub video_views_30s: u64,
    pub measured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_snapshot_deserializes_with_missing_counters() {
        let snapshot: MetricSnapshot =
            serde_json::from_str(r#"{"measured_at":"2025-06-01T12:00:00Z"}"#)
                .expect("partial snapshot should deserialize");
        assert_eq!(snapshot.views, 0);
        assert_eq!(snapshot.impressions, 0);
        assert_eq!(snapshot.video_views_30s, 0);
    }

    #[test]
    fn content_record_round_trips_through_json() {
        let record = ContentRecord {
            video_id: "abc123".to_string(),
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            channel_id: "UC123".to_string(),
            channel_title: "Channel".to_string(),
            published_at: None,
            thumbnail_url: None,
            duration_seconds: 95,
            duration_display: "1:35".to_string(),
            category_id: "22".to_string(),
            tags: vec!["tag".to_string()],
            views: 100,
            likes: 10,
            comments: 2,
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let back: ContentRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.video_id, "abc123");
        assert_eq!(back.duration_seconds, 95);
    }
}
