//! Database operations for the `metric_snapshots` time series.

use chrono::{DateTime, Utc};
use creaft_core::MetricSnapshot;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `metric_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MetricSnapshotRow {
    pub id: i64,
    pub content_id: i64,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub saves: i64,
    pub impressions: i64,
    pub plays: i64,
    pub video_views_30s: i64,
    pub engagement_rate: f64,
    pub view_rate: f64,
    pub completion_rate: f64,
    pub measured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl MetricSnapshotRow {
    /// Converts the row back to the in-memory snapshot scoring works on.
    ///
    /// The cached rate columns are deliberately left behind: buzz scoring
    /// recomputes every rate from the raw counters.
    #[must_use]
    pub fn to_snapshot(&self) -> MetricSnapshot {
        let counter = |v: i64| u64::try_from(v).unwrap_or(0);
        MetricSnapshot {
            views: counter(self.views),
            likes: counter(self.likes),
            comments: counter(self.comments),
            shares: counter(self.shares),
            saves: counter(self.saves),
            impressions: counter(self.impressions),
            plays: counter(self.plays),
            video_views_30s: counter(self.video_views_30s),
            measured_at: self.measured_at,
        }
    }
}

/// Rate values cached alongside a snapshot at write time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotRates {
    pub engagement_rate: f64,
    pub view_rate: f64,
    pub completion_rate: f64,
}

fn as_bigint(counter: u64) -> i64 {
    i64::try_from(counter).unwrap_or(i64::MAX)
}

/// Appends one snapshot to a content's time series.
///
/// Snapshots are never updated in place; each collection pass appends a new
/// measurement. Returns the internal `id` of the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including an unknown
/// `content_id`, which violates the foreign key).
pub async fn insert_metric_snapshot(
    pool: &PgPool,
    content_id: i64,
    snapshot: &MetricSnapshot,
    rates: SnapshotRates,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO metric_snapshots \
             (content_id, views, likes, comments, shares, saves, impressions, plays, \
              video_views_30s, engagement_rate, view_rate, completion_rate, measured_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id",
    )
    .bind(content_id)
    .bind(as_bigint(snapshot.views))
    .bind(as_bigint(snapshot.likes))
    .bind(as_bigint(snapshot.comments))
    .bind(as_bigint(snapshot.shares))
    .bind(as_bigint(snapshot.saves))
    .bind(as_bigint(snapshot.impressions))
    .bind(as_bigint(snapshot.plays))
    .bind(as_bigint(snapshot.video_views_30s))
    .bind(rates.engagement_rate)
    .bind(rates.view_rate)
    .bind(rates.completion_rate)
    .bind(snapshot.measured_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns the most recent snapshot for a content, or `None` when the series
/// is empty.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_snapshot_for_content(
    pool: &PgPool,
    content_id: i64,
) -> Result<Option<MetricSnapshotRow>, DbError> {
    let row = sqlx::query_as::<_, MetricSnapshotRow>(
        "SELECT id, content_id, views, likes, comments, shares, saves, impressions, plays, \
                video_views_30s, engagement_rate, view_rate, completion_rate, \
                measured_at, created_at \
         FROM metric_snapshots \
         WHERE content_id = $1 \
         ORDER BY measured_at DESC \
         LIMIT 1",
    )
    .bind(content_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns a content's snapshots newest first, limited to `limit` rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_snapshots_for_content(
    pool: &PgPool,
    content_id: i64,
    limit: i64,
) -> Result<Vec<MetricSnapshotRow>, DbError> {
    let rows = sqlx::query_as::<_, MetricSnapshotRow>(
        "SELECT id, content_id, views, likes, comments, shares, saves, impressions, plays, \
                video_views_30s, engagement_rate, view_rate, completion_rate, \
                measured_at, created_at \
         FROM metric_snapshots \
         WHERE content_id = $1 \
         ORDER BY measured_at DESC \
         LIMIT $2",
    )
    .bind(content_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
