//! Database operations for the `contents` table.

use chrono::{DateTime, Utc};
use creaft_core::ContentRecord;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `contents` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentRow {
    pub id: i64,
    pub public_id: Uuid,
    pub video_id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: i64,
    pub duration_display: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRow {
    /// Converts the row back to the in-memory record scoring works on.
    ///
    /// Counters are stored as `BIGINT`; negative values (which the collector
    /// never writes) read back as 0.
    #[must_use]
    pub fn to_record(&self) -> ContentRecord {
        ContentRecord {
            video_id: self.video_id.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            channel_id: self.channel_id.clone(),
            channel_title: self.channel_title.clone(),
            published_at: self.published_at,
            thumbnail_url: self.thumbnail_url.clone(),
            duration_seconds: self.duration_seconds,
            duration_display: self.duration_display.clone(),
            category_id: self.category_id.clone(),
            tags: self.tags.clone(),
            views: u64::try_from(self.views).unwrap_or(0),
            likes: u64::try_from(self.likes).unwrap_or(0),
            comments: u64::try_from(self.comments).unwrap_or(0),
        }
    }
}

fn as_bigint(counter: u64) -> i64 {
    i64::try_from(counter).unwrap_or(i64::MAX)
}

/// Upserts a content row from a collected record.
///
/// Conflicts on `video_id` update the mutable fields (title, counters,
/// metadata) and refresh `updated_at`, so repeated collection runs keep one
/// row per video with its latest observed state.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_content(pool: &PgPool, record: &ContentRecord) -> Result<i64, DbError> {
    let public_id = Uuid::new_v4();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO contents \
             (public_id, video_id, url, title, description, channel_id, channel_title, \
              published_at, thumbnail_url, duration_seconds, duration_display, \
              category_id, tags, views, likes, comments) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         ON CONFLICT (video_id) DO UPDATE SET \
             url              = EXCLUDED.url, \
             title            = EXCLUDED.title, \
             description      = EXCLUDED.description, \
             channel_id       = EXCLUDED.channel_id, \
             channel_title    = EXCLUDED.channel_title, \
             published_at     = EXCLUDED.published_at, \
             thumbnail_url    = EXCLUDED.thumbnail_url, \
             duration_seconds = EXCLUDED.duration_seconds, \
             duration_display = EXCLUDED.duration_display, \
             category_id      = EXCLUDED.category_id, \
             tags             = EXCLUDED.tags, \
             views            = EXCLUDED.views, \
             likes            = EXCLUDED.likes, \
             comments         = EXCLUDED.comments, \
             updated_at       = NOW() \
         RETURNING id",
    )
    .bind(public_id)
    .bind(&record.video_id)
    .bind(&record.url)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.channel_id)
    .bind(&record.channel_title)
    .bind(record.published_at)
    .bind(&record.thumbnail_url)
    .bind(record.duration_seconds)
    .bind(&record.duration_display)
    .bind(&record.category_id)
    .bind(&record.tags)
    .bind(as_bigint(record.views))
    .bind(as_bigint(record.likes))
    .bind(as_bigint(record.comments))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns a single content row by platform video id, or `None` if unknown.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_content_by_video_id(
    pool: &PgPool,
    video_id: &str,
) -> Result<Option<ContentRow>, DbError> {
    let row = sqlx::query_as::<_, ContentRow>(
        "SELECT id, public_id, video_id, url, title, description, channel_id, channel_title, \
                published_at, thumbnail_url, duration_seconds, duration_display, \
                category_id, tags, views, likes, comments, created_at, updated_at \
         FROM contents \
         WHERE video_id = $1",
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns recently published contents, optionally filtered by category.
///
/// Results are ordered by `published_at DESC NULLS LAST`, limited to `limit`
/// rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_contents(
    pool: &PgPool,
    category_id: Option<&str>,
    limit: i64,
) -> Result<Vec<ContentRow>, DbError> {
    let rows = sqlx::query_as::<_, ContentRow>(
        "SELECT id, public_id, video_id, url, title, description, channel_id, channel_title, \
                published_at, thumbnail_url, duration_seconds, duration_display, \
                category_id, tags, views, likes, comments, created_at, updated_at \
         FROM contents \
         WHERE ($1::TEXT IS NULL OR category_id = $1) \
         ORDER BY published_at DESC NULLS LAST \
         LIMIT $2",
    )
    .bind(category_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
