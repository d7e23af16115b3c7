//! Viral potential scoring for freshly observed content.
//!
//! Combines view velocity, engagement rate, and recency into a single
//! 0–100 score. The three signals are capped independently (40/30/30) so
//! that no single dimension (a stale-but-popular video, say) can saturate
//! the score on its own. Recency decays in two regimes: steep over the first
//! 24 hours, gentler through hour 72, zero after.

use chrono::{DateTime, Utc};
use creaft_core::ContentRecord;
use serde::{Deserialize, Serialize};

use crate::round::round2;

/// Ordinal label for a viral score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViralStatus {
    Slow,
    Steady,
    Growing,
    Trending,
    Viral,
}

impl ViralStatus {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ViralStatus::Viral
        } else if score >= 60.0 {
            ViralStatus::Trending
        } else if score >= 40.0 {
            ViralStatus::Growing
        } else if score >= 20.0 {
            ViralStatus::Steady
        } else {
            ViralStatus::Slow
        }
    }
}

impl std::fmt::Display for ViralStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ViralStatus::Slow => "slow",
            ViralStatus::Steady => "steady",
            ViralStatus::Growing => "growing",
            ViralStatus::Trending => "trending",
            ViralStatus::Viral => "viral",
        };
        write!(f, "{label}")
    }
}

/// The full viral-potential assessment for one content record.
#[derive(Debug, Clone, Serialize)]
pub struct ViralPotential {
    pub viral_score: f64,
    pub engagement_rate: f64,
    pub views_per_hour: f64,
    pub hours_since_published: f64,
    pub status: ViralStatus,
    pub prediction: String,
}

/// Compute the raw viral score in [0, 100].
///
/// Velocity contributes up to 40 points (`views_per_hour / 100`), engagement
/// up to 30 (`engagement_rate * 3`), and recency up to 30 (linear decay to 15
/// at hour 24, then to 0 at hour 72).
#[must_use]
pub fn viral_score(views_per_hour: f64, engagement_rate: f64, hours_since_published: f64) -> f64 {
    let velocity = (views_per_hour / 100.0).min(40.0);
    let engagement = (engagement_rate * 3.0).min(30.0);

    let recency = if hours_since_published < 24.0 {
        30.0 * (1.0 - hours_since_published / 24.0)
    } else if hours_since_published < 72.0 {
        15.0 * (1.0 - (hours_since_published - 24.0) / 48.0)
    } else {
        0.0
    };

    (velocity + engagement + recency).clamp(0.0, 100.0)
}

impl ViralPotential {
    /// Assess a content record against the clock instant `now`.
    ///
    /// Derives `views_per_hour` (0 when the record is not yet an hour old or
    /// carries a future timestamp) and `engagement_rate` from raw counters
    /// (0 when views is 0). A record without a publish timestamp degrades to
    /// the all-zero assessment.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(record: &ContentRecord, now: DateTime<Utc>) -> Self {
        let Some(published_at) = record.published_at else {
            return Self::zeroed();
        };

        let hours_since_published = (now - published_at).num_seconds() as f64 / 3600.0;
        let views = record.views as f64;

        let views_per_hour = if hours_since_published > 0.0 {
            views / hours_since_published
        } else {
            0.0
        };
        let engagement_rate = if record.views > 0 {
            (record.likes + record.comments) as f64 / views * 100.0
        } else {
            0.0
        };

        let score = viral_score(views_per_hour, engagement_rate, hours_since_published);

        ViralPotential {
            viral_score: round2(score),
            engagement_rate: round2(engagement_rate),
            views_per_hour: round2(views_per_hour),
            hours_since_published: round2(hours_since_published),
            status: ViralStatus::from_score(score),
            prediction: prediction(score, views_per_hour),
        }
    }

    fn zeroed() -> Self {
        ViralPotential {
            viral_score: 0.0,
            engagement_rate: 0.0,
            views_per_hour: 0.0,
            hours_since_published: 0.0,
            status: ViralStatus::Slow,
            prediction: "Normal growth pattern.".to_string(),
        }
    }
}

/// Human prediction line for a score.
///
/// Scores of 40 and above interpolate the estimated 24-hour view count
/// (`views_per_hour * 24`, comma-grouped); below that the message is generic.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn prediction(score: f64, views_per_hour: f64) -> String {
    let estimated = format_count((views_per_hour * 24.0).max(0.0) as u64);
    if score >= 80.0 {
        format!("This video is going viral! {estimated} estimated views in 24h")
    } else if score >= 60.0 {
        format!("Strong trending momentum. {estimated} estimated views in 24h")
    } else if score >= 40.0 {
        format!("Good growth potential, on pace for {estimated} views in 24h. Monitor closely.")
    } else {
        "Normal growth pattern.".to_string()
    }
}

/// Group a count with commas every three digits (`1234567` → `1,234,567`).
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
