//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring trending-collection job.

use std::sync::Arc;

use chrono::Utc;
use creaft_core::MetricSnapshot;
use creaft_db::SnapshotRates;
use creaft_youtube::{YoutubeClient, YoutubeError};
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process; dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    youtube: Arc<YoutubeClient>,
    region: String,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_trending_job(&scheduler, pool, youtube, region).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the hourly trending-collection job.
///
/// Runs at the top of every hour (`0 0 * * * *`): fetches the current
/// trending chart for the configured region, upserts content rows, and
/// appends one metric snapshot per video.
async fn register_trending_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    youtube: Arc<YoutubeClient>,
    region: String,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);
    let region = Arc::new(region);

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let youtube = Arc::clone(&youtube);
        let region = Arc::clone(&region);

        Box::pin(async move {
            tracing::info!(region = %region, "scheduler: starting trending collection");
            run_trending_collection(&pool, &youtube, &region).await;
            tracing::info!(region = %region, "scheduler: trending collection complete");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Fetch the trending chart and persist every record with a fresh snapshot.
///
/// Exhausted quota aborts the run; per-video persistence failures are logged
/// and skipped so one bad row does not lose the batch.
pub async fn run_trending_collection(pool: &PgPool, youtube: &YoutubeClient, region: &str) {
    let records = match youtube.trending_videos(region, None, 50).await {
        Ok(records) => records,
        Err(YoutubeError::QuotaExceeded(message)) => {
            tracing::warn!(region, message, "scheduler: quota exhausted; skipping run");
            return;
        }
        Err(e) => {
            tracing::error!(region, error = %e, "scheduler: trending fetch failed");
            return;
        }
    };

    let measured_at = Utc::now();
    let mut stored = 0usize;

    for record in &records {
        let content_id = match creaft_db::upsert_content(pool, record).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(video_id = %record.video_id, error = %e, "scheduler: content upsert failed");
                continue;
            }
        };

        // The Data API exposes only view/like/comment counters; the richer
        // impression fields stay zero until another source fills them.
        let snapshot = MetricSnapshot {
            views: record.views,
            likes: record.likes,
            comments: record.comments,
            shares: 0,
            saves: 0,
            impressions: 0,
            plays: 0,
            video_views_30s: 0,
            measured_at,
        };
        let rates = SnapshotRates {
            engagement_rate: creaft_scoring::engagement_rate(&snapshot),
            view_rate: creaft_scoring::view_rate(&snapshot),
            completion_rate: creaft_scoring::completion_rate(&snapshot),
        };

        match creaft_db::insert_metric_snapshot(pool, content_id, &snapshot, rates).await {
            Ok(_) => stored += 1,
            Err(e) => {
                tracing::error!(video_id = %record.video_id, error = %e, "scheduler: snapshot insert failed");
            }
        }
    }

    tracing::info!(
        region,
        fetched = records.len(),
        stored,
        "scheduler: trending batch persisted"
    );
}
