//! Buzz scoring for stored metric snapshots.
//!
//! The buzz score is the product of engagement rate, view rate, and a linear
//! recency decay with a 0.1 floor, so week-old measurements keep a residual
//! 10% multiplier instead of dropping to zero.
//!
//! The rate functions recompute from raw counters every time. Snapshot rows
//! may cache rate values, but those caches go stale when counters change;
//! recompute-on-read is the contract.

use chrono::{DateTime, Utc};
use creaft_core::MetricSnapshot;

use crate::round::round2;

/// Engagement rate as a percentage: `(likes + comments + shares) / impressions * 100`.
///
/// Returns 0 when impressions is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(snapshot: &MetricSnapshot) -> f64 {
    if snapshot.impressions == 0 {
        return 0.0;
    }
    let engagement = (snapshot.likes + snapshot.comments + snapshot.shares) as f64;
    round2(engagement / snapshot.impressions as f64 * 100.0)
}

/// View rate as a percentage: `views / impressions * 100`.
///
/// Returns 0 when impressions is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn view_rate(snapshot: &MetricSnapshot) -> f64 {
    if snapshot.impressions == 0 {
        return 0.0;
    }
    round2(snapshot.views as f64 / snapshot.impressions as f64 * 100.0)
}

/// Video completion rate as a percentage: `video_views_30s / plays * 100`.
///
/// Returns 0 when plays is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_rate(snapshot: &MetricSnapshot) -> f64 {
    if snapshot.plays == 0 {
        return 0.0;
    }
    round2(snapshot.video_views_30s as f64 / snapshot.plays as f64 * 100.0)
}

/// Linear recency decay over one week, floored at 0.1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recency_factor(measured_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours_since_measurement = (now - measured_at).num_seconds() as f64 / 3600.0;
    (1.0 - hours_since_measurement / 168.0).max(0.1)
}

/// Buzz score: `engagement_rate * view_rate * recency_factor`, 2-decimal rounded.
///
/// Unbounded above; 0 whenever impressions is 0 (both rates collapse).
#[must_use]
pub fn buzz_score(snapshot: &MetricSnapshot, now: DateTime<Utc>) -> f64 {
    round2(engagement_rate(snapshot) * view_rate(snapshot) * recency_factor(snapshot.measured_at, now))
}
