//! Stored-content endpoints backed by Postgres.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use creaft_core::ContentRecord;
use creaft_db::ContentRow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ContentsQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SnapshotsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentItem {
    content_id: Uuid,
    #[serde(flatten)]
    record: ContentRecord,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct SnapshotItem {
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    saves: u64,
    impressions: u64,
    plays: u64,
    video_views_30s: u64,
    engagement_rate: f64,
    view_rate: f64,
    completion_rate: f64,
    measured_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct BuzzItem {
    video_id: String,
    buzz_score: f64,
    engagement_rate: f64,
    view_rate: f64,
    completion_rate: f64,
    recency_factor: f64,
    measured_at: DateTime<Utc>,
}

fn content_item(row: ContentRow) -> ContentItem {
    ContentItem {
        content_id: row.public_id,
        record: row.to_record(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

async fn require_content(
    state: &AppState,
    req_id: &RequestId,
    video_id: &str,
) -> Result<ContentRow, ApiError> {
    creaft_db::get_content_by_video_id(&state.pool, video_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "content not found"))
}

pub(super) async fn list_contents(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ContentsQuery>,
) -> Result<Json<ApiResponse<Vec<ContentItem>>>, ApiError> {
    let rows = creaft_db::list_recent_contents(
        &state.pool,
        query.category.as_deref(),
        normalize_limit(query.limit),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(content_item).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_content(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<ContentItem>>, ApiError> {
    let row = require_content(&state, &req_id, &video_id).await?;

    Ok(Json(ApiResponse {
        data: content_item(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_snapshots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(video_id): Path<String>,
    Query(query): Query<SnapshotsQuery>,
) -> Result<Json<ApiResponse<Vec<SnapshotItem>>>, ApiError> {
    let content = require_content(&state, &req_id, &video_id).await?;

    let rows =
        creaft_db::list_snapshots_for_content(&state.pool, content.id, normalize_limit(query.limit))
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| {
            let snapshot = row.to_snapshot();
            // Derived rates are always recomputed from the raw counters.
            SnapshotItem {
                views: snapshot.views,
                likes: snapshot.likes,
                comments: snapshot.comments,
                shares: snapshot.shares,
                saves: snapshot.saves,
                impressions: snapshot.impressions,
                plays: snapshot.plays,
                video_views_30s: snapshot.video_views_30s,
                engagement_rate: creaft_scoring::engagement_rate(&snapshot),
                view_rate: creaft_scoring::view_rate(&snapshot),
                completion_rate: creaft_scoring::completion_rate(&snapshot),
                measured_at: snapshot.measured_at,
            }
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_buzz(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<BuzzItem>>, ApiError> {
    let content = require_content(&state, &req_id, &video_id).await?;

    let Some(row) = creaft_db::latest_snapshot_for_content(&state.pool, content.id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
    else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no metric snapshots for content",
        ));
    };

    let snapshot = row.to_snapshot();
    let now = Utc::now();

    Ok(Json(ApiResponse {
        data: BuzzItem {
            video_id,
            buzz_score: creaft_scoring::buzz_score(&snapshot, now),
            engagement_rate: creaft_scoring::engagement_rate(&snapshot),
            view_rate: creaft_scoring::view_rate(&snapshot),
            completion_rate: creaft_scoring::completion_rate(&snapshot),
            recency_factor: creaft_scoring::recency_factor(snapshot.measured_at, now),
            measured_at: snapshot.measured_at,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
