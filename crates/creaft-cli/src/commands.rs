//! Command handlers for the CLI.
//!
//! These are called from `main` after configuration is loaded. `trending`
//! and `viral` are read-only API calls; `collect` also writes to the
//! database.

use chrono::Utc;
use creaft_core::{AppConfig, MetricSnapshot};
use creaft_db::SnapshotRates;
use creaft_scoring::ViralPotential;
use creaft_youtube::YoutubeClient;

fn build_client(config: &AppConfig) -> anyhow::Result<YoutubeClient> {
    let client = YoutubeClient::new(
        &config.youtube_api_key,
        config.youtube_request_timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))?
    .with_retry_policy(
        config.youtube_max_retries,
        config.youtube_retry_backoff_base_ms,
    );
    Ok(client)
}

/// Fetch the trending chart and print the batch pattern analysis as JSON.
pub(crate) async fn run_trending(
    config: &AppConfig,
    region: Option<&str>,
    category: Option<&str>,
    max_results: u32,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let region = region.unwrap_or(&config.region);

    let records = client
        .trending_videos(region, category, max_results.clamp(1, 50))
        .await?;
    if records.is_empty() {
        anyhow::bail!("no trending videos returned for region {region}");
    }

    let summary = creaft_scoring::analyze_trending_patterns(&records);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Fetch one video and print its viral-potential assessment as JSON.
pub(crate) async fn run_viral(config: &AppConfig, video_id: &str) -> anyhow::Result<()> {
    let client = build_client(config)?;

    let records = client.videos_details(&[video_id.to_string()]).await?;
    let Some(record) = records.first() else {
        anyhow::bail!("video '{video_id}' not found");
    };

    let assessment = ViralPotential::evaluate(record, Utc::now());
    let output = serde_json::json!({
        "video_id": record.video_id,
        "title": record.title,
        "assessment": assessment,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Fetch the trending chart and persist every record with a fresh snapshot.
///
/// Per-video persistence failures are logged and skipped, not propagated.
pub(crate) async fn run_collect(config: &AppConfig, region: Option<&str>) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let region = region.unwrap_or(&config.region);

    let pool_config = creaft_db::PoolConfig::from_app_config(config);
    let pool = creaft_db::connect_pool(&config.database_url, pool_config).await?;
    creaft_db::run_migrations(&pool).await?;

    let records = client.trending_videos(region, None, 50).await?;
    let measured_at = Utc::now();
    let mut stored = 0usize;

    for record in &records {
        let content_id = match creaft_db::upsert_content(&pool, record).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(video_id = %record.video_id, error = %e, "content upsert failed");
                continue;
            }
        };

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

        match creaft_db::insert_metric_snapshot(&pool, content_id, &snapshot, rates).await {
            Ok(_) => stored += 1,
            Err(e) => {
                tracing::error!(video_id = %record.video_id, error = %e, "snapshot insert failed");
            }
        }
    }

    println!(
        "collected {stored} of {} trending videos for region {region}",
        records.len()
    );
    Ok(())
}
