//! Batch pattern analysis over collected content records.
//!
//! Summarizes a batch into category/tag/duration/engagement distributions.
//! Tag tallies cap each record's contribution at its first 10 tags so one
//! heavily-tagged item cannot dominate. Top-list ties resolve in
//! first-encountered order, which requires tracking insertion order
//! explicitly and sorting stably on count alone.

use std::collections::HashMap;

use creaft_core::ContentRecord;
use serde::Serialize;

use crate::round::round2;

const TAGS_PER_RECORD: usize = 10;
const TOP_CATEGORIES: usize = 5;
const TOP_TAGS: usize = 20;

const SHORT_MAX_SECONDS: i64 = 180;
const MEDIUM_MAX_SECONDS: i64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DurationDistribution {
    pub short: u64,
    pub medium: u64,
    pub long: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate: f64,
}

/// Summary of a batch of content records.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingSummary {
    pub total_videos_analyzed: usize,
    pub top_categories: Vec<CategoryCount>,
    pub top_tags: Vec<TagCount>,
    pub duration_distribution: DurationDistribution,
    pub average_metrics: AverageMetrics,
}

/// Occurrence tally that remembers first-seen order for tie-breaking.
#[derive(Default)]
struct Tally {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl Tally {
    fn bump(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.order.push(key.to_string());
            self.counts.insert(key.to_string(), 1);
        }
    }

    /// Top `n` keys by count, ties in first-seen order (stable sort).
    fn top(mut self, n: usize) -> Vec<(String, u64)> {
        let counts = std::mem::take(&mut self.counts);
        let mut entries: Vec<(String, u64)> = self
            .order
            .into_iter()
            .map(|key| {
                let count = counts.get(&key).copied().unwrap_or(0);
                (key, count)
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

/// Summarize a batch of content records.
///
/// An empty batch degrades to the all-zero summary: averages, rates, and
/// buckets are all 0 and both top-lists are empty.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn analyze_trending_patterns(records: &[ContentRecord]) -> TrendingSummary {
    let mut categories = Tally::default();
    let mut tags = Tally::default();
    let mut duration_distribution = DurationDistribution::default();

    let mut total_views: u64 = 0;
    let mut total_likes: u64 = 0;
    let mut total_comments: u64 = 0;

    for record in records {
        categories.bump(&record.category_id);

        for tag in record.tags.iter().take(TAGS_PER_RECORD) {
            tags.bump(&tag.to_lowercase());
        }

        if record.duration_seconds < SHORT_MAX_SECONDS {
            duration_distribution.short += 1;
        } else if record.duration_seconds < MEDIUM_MAX_SECONDS {
            duration_distribution.medium += 1;
        } else {
            duration_distribution.long += 1;
        }

        total_views += record.views;
        total_likes += record.likes;
        total_comments += record.comments;
    }

    let count = records.len();
    let average = |total: u64| -> u64 {
        if count == 0 {
            0
        } else {
            // Halves round to even.
            (total as f64 / count as f64).round_ties_even() as u64
        }
    };

    let engagement_rate = if total_views > 0 {
        round2((total_likes + total_comments) as f64 / total_views as f64 * 100.0)
    } else {
        0.0
    };

    TrendingSummary {
        total_videos_analyzed: count,
        top_categories: categories
            .top(TOP_CATEGORIES)
            .into_iter()
            .map(|(id, count)| CategoryCount { id, count })
            .collect(),
        top_tags: tags
            .top(TOP_TAGS)
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect(),
        duration_distribution,
        average_metrics: AverageMetrics {
            views: average(total_views),
            likes: average(total_likes),
            comments: average(total_comments),
            engagement_rate,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category_id: &str, tags: &[&str], duration_seconds: i64) -> ContentRecord {
        ContentRecord {
            video_id: format!("vid-{category_id}-{duration_seconds}"),
            url: String::new(),
            title: String::new(),
            description: String::new(),
            channel_id: String::new(),
            channel_title: String::new(),
            published_at: None,
            thumbnail_url: None,
            duration_seconds,
            duration_display: crate::duration::format_duration(duration_seconds),
            category_id: category_id.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            views: 0,
            likes: 0,
            comments: 0,
        }
    }

    fn record_with_counts(views: u64, likes: u64, comments: u64) -> ContentRecord {
        ContentRecord {
            views,
            likes,
            comments,
            ..record("24", &[], 300)
        }
    }

    #[test]
    fn empty_batch_degrades_to_zero_summary() {
        let summary = analyze_trending_patterns(&[]);
        assert_eq!(summary.total_videos_analyzed, 0);
        assert!(summary.top_categories.is_empty());
        assert!(summary.top_tags.is_empty());
        assert_eq!(summary.duration_distribution, DurationDistribution::default());
        assert_eq!(summary.average_metrics.views, 0);
        assert_eq!(summary.average_metrics.likes, 0);
        assert_eq!(summary.average_metrics.comments, 0);
        assert!((summary.average_metrics.engagement_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn categories_tally_and_rank_by_count() {
        let records = vec![
            record("10", &[], 60),
            record("24", &[], 60),
            record("10", &[], 60),
        ];
        let summary = analyze_trending_patterns(&records);
        assert_eq!(
            summary.top_categories,
            vec![
                CategoryCount {
                    id: "10".to_string(),
                    count: 2
                },
                CategoryCount {
                    id: "24".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn category_ties_break_in_first_seen_order() {
        let records = vec![
            record("zebra", &[], 60),
            record("alpha", &[], 60),
            record("mango", &[], 60),
        ];
        let summary = analyze_trending_patterns(&records);
        let ids: Vec<&str> = summary.top_categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["zebra", "alpha", "mango"]);
    }

    #[test]
    fn tags_are_lowercased_and_capped_at_ten_per_record() {
        let many_tags: Vec<String> = (0..15).map(|i| format!("tag{i}")).collect();
        let many_refs: Vec<&str> = many_tags.iter().map(String::as_str).collect();
        let records = vec![record("1", &many_refs, 60), record("1", &["TAG0"], 60)];
        let summary = analyze_trending_patterns(&records);

        let tag0 = summary
            .top_tags
            .iter()
            .find(|t| t.tag == "tag0")
            .expect("tag0 tallied");
        assert_eq!(tag0.count, 2, "TAG0 should fold into tag0");

        // Tags 10..14 fall past the per-record cap.
        assert!(
            !summary.top_tags.iter().any(|t| t.tag == "tag12"),
            "tags beyond the first 10 must not be tallied"
        );
    }

    #[test]
    fn top_tags_truncate_at_twenty() {
        let tags: Vec<String> = (0..10).map(|i| format!("a{i}")).collect();
        let more: Vec<String> = (0..10).map(|i| format!("b{i}")).collect();
        let extra: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
        fn as_refs(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }

        let records = vec![
            record("1", &as_refs(&tags), 60),
            record("1", &as_refs(&more), 60),
            record("1", &as_refs(&extra), 60),
        ];
        let summary = analyze_trending_patterns(&records);
        assert_eq!(summary.top_tags.len(), 20);
    }

    #[test]
    fn duration_buckets_have_inclusive_upper_boundaries() {
        let records = vec![
            record("1", &[], 179),
            record("1", &[], 180),
            record("1", &[], 599),
            record("1", &[], 600),
            record("1", &[], 3_600),
        ];
        let summary = analyze_trending_patterns(&records);
        assert_eq!(summary.duration_distribution.short, 1);
        assert_eq!(summary.duration_distribution.medium, 2);
        assert_eq!(summary.duration_distribution.long, 2);
    }

    #[test]
    fn averages_round_halves_to_even() {
        let records = vec![
            record_with_counts(100, 10, 1),
            record_with_counts(201, 11, 2),
        ];
        let summary = analyze_trending_patterns(&records);
        assert_eq!(summary.average_metrics.views, 150); // 150.5 rounds to even
        assert_eq!(summary.average_metrics.likes, 10); // 10.5 rounds to even
        assert_eq!(summary.average_metrics.comments, 2); // 1.5 rounds to even
    }

    #[test]
    fn overall_engagement_rate_uses_summed_counters() {
        let records = vec![
            record_with_counts(40_000, 800, 100),
            record_with_counts(10_000, 200, 100),
        ];
        let summary = analyze_trending_patterns(&records);
        // (1000 + 200) / 50000 * 100 = 2.4
        assert!((summary.average_metrics.engagement_rate - 2.4).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_views_guards_engagement_rate() {
        let records = vec![record_with_counts(0, 5, 5)];
        let summary = analyze_trending_patterns(&records);
        assert!((summary.average_metrics.engagement_rate).abs() < f64::EPSILON);
    }
}
