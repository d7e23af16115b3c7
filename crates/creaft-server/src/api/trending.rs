//! Live trending endpoints backed by the YouTube client.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{Duration, Utc};
use creaft_core::ContentRecord;
use creaft_scoring::{analyze_trending_patterns, TrendingSummary, ViralPotential};
use creaft_youtube::SearchOrder;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_youtube_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// YouTube assignable category ids and their display names.
const CATEGORIES: &[(&str, &str)] = &[
    ("1", "Film & Animation"),
    ("2", "Autos & Vehicles"),
    ("10", "Music"),
    ("15", "Pets & Animals"),
    ("17", "Sports"),
    ("19", "Travel & Events"),
    ("20", "Gaming"),
    ("22", "People & Blogs"),
    ("23", "Comedy"),
    ("24", "Entertainment"),
    ("25", "News & Politics"),
    ("26", "Howto & Style"),
    ("27", "Education"),
    ("28", "Science & Technology"),
    ("29", "Nonprofits & Activism"),
];

fn normalize_max_results(max_results: Option<u32>) -> u32 {
    max_results.unwrap_or(50).clamp(1, 50)
}

/// `category=all` (or absent) means the unfiltered chart.
fn normalize_category(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
}

fn parse_order(order: Option<&str>) -> SearchOrder {
    match order {
        Some("date") => SearchOrder::Date,
        Some("viewCount" | "view_count") => SearchOrder::ViewCount,
        Some("rating") => SearchOrder::Rating,
        _ => SearchOrder::Relevance,
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendingQuery {
    pub region: Option<String>,
    pub category: Option<String>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub keyword: Option<String>,
    pub published_after_hours: Option<i64>,
    pub order: Option<String>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct PatternsRequest {
    #[serde(default)]
    pub video_ids: Vec<String>,
    pub region: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TrendingVideoItem {
    #[serde(flatten)]
    content: ContentRecord,
    viral: ViralPotential,
}

#[derive(Debug, Serialize)]
pub(super) struct ViralPotentialItem {
    video_id: String,
    title: String,
    #[serde(flatten)]
    assessment: ViralPotential,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    id: &'static str,
    name: &'static str,
}

fn with_viral(records: Vec<ContentRecord>) -> Vec<TrendingVideoItem> {
    let now = Utc::now();
    records
        .into_iter()
        .map(|content| {
            let viral = ViralPotential::evaluate(&content, now);
            TrendingVideoItem { content, viral }
        })
        .collect()
}

pub(super) async fn list_trending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<ApiResponse<Vec<TrendingVideoItem>>>, ApiError> {
    let region = query.region.as_deref().unwrap_or(&state.region);
    let records = state
        .youtube
        .trending_videos(
            region,
            normalize_category(query.category.as_deref()),
            normalize_max_results(query.max_results),
        )
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: with_viral(records),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<TrendingVideoItem>>>, ApiError> {
    let keyword = query
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "validation_error", "keyword is required")
        })?;

    let published_after = query
        .published_after_hours
        .filter(|h| *h > 0)
        .map(|h| Utc::now() - Duration::hours(h));

    let records = state
        .youtube
        .search_videos(
            keyword,
            published_after,
            parse_order(query.order.as_deref()),
            normalize_max_results(query.max_results),
        )
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: with_viral(records),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn viral_potential(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<ViralPotentialItem>>, ApiError> {
    let records = state
        .youtube
        .videos_details(&[video_id.clone()])
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    let Some(content) = records.into_iter().next() else {
        return Err(ApiError::new(req_id.0, "not_found", "video not found"));
    };

    let assessment = ViralPotential::evaluate(&content, Utc::now());

    Ok(Json(ApiResponse {
        data: ViralPotentialItem {
            video_id: content.video_id,
            title: content.title,
            assessment,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Analyzes patterns across a batch of videos.
///
/// An explicit `video_ids` list is hydrated via the details endpoint;
/// otherwise the current trending chart for the requested (or configured)
/// region is analyzed.
pub(super) async fn analyze_patterns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Option<Json<PatternsRequest>>,
) -> Result<Json<ApiResponse<TrendingSummary>>, ApiError> {
    let Json(request) = body.unwrap_or_default();

    let records = if request.video_ids.is_empty() {
        let region = request.region.as_deref().unwrap_or(&state.region);
        state
            .youtube
            .trending_videos(region, normalize_category(request.category.as_deref()), 50)
            .await
            .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?
    } else {
        state
            .youtube
            .videos_details(&request.video_ids)
            .await
            .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?
    };

    if records.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "no videos to analyze",
        ));
    }

    Ok(Json(ApiResponse {
        data: analyze_trending_patterns(&records),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn categories(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryItem>>> {
    let data = CATEGORIES
        .iter()
        .map(|(id, name)| CategoryItem { id, name })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_results_clamps_to_api_page_limit() {
        assert_eq!(normalize_max_results(None), 50);
        assert_eq!(normalize_max_results(Some(0)), 1);
        assert_eq!(normalize_max_results(Some(500)), 50);
        assert_eq!(normalize_max_results(Some(10)), 10);
    }

    #[test]
    fn category_all_means_unfiltered() {
        assert_eq!(normalize_category(Some("all")), None);
        assert_eq!(normalize_category(Some("All")), None);
        assert_eq!(normalize_category(Some("")), None);
        assert_eq!(normalize_category(None), None);
        assert_eq!(normalize_category(Some("10")), Some("10"));
    }

    #[test]
    fn unknown_order_falls_back_to_relevance() {
        assert_eq!(parse_order(Some("date")), SearchOrder::Date);
        assert_eq!(parse_order(Some("view_count")), SearchOrder::ViewCount);
        assert_eq!(parse_order(Some("bogus")), SearchOrder::Relevance);
        assert_eq!(parse_order(None), SearchOrder::Relevance);
    }
}
