//! Hit-probability estimation over a posted analysis vector.

use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use creaft_scoring::{AnalysisVector, HitBreakdown};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

/// The vector fields sit at the top level of the body; `published_at` rides
/// alongside them. An empty body is the fully neutral request.
#[derive(Debug, Default, Deserialize)]
pub(super) struct HitProbabilityRequest {
    #[serde(flatten)]
    vector: AnalysisVector,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

pub(super) async fn hit_probability(
    Extension(req_id): Extension<RequestId>,
    body: Option<Json<HitProbabilityRequest>>,
) -> Json<ApiResponse<HitBreakdown>> {
    let Json(request) = body.unwrap_or_default();

    Json(ApiResponse {
        data: HitBreakdown::compute(&request.vector, request.published_at),
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_deserializes_to_neutral_request() {
        let request: HitProbabilityRequest = serde_json::from_str("{}").expect("empty object");
        assert!(request.published_at.is_none());
        let breakdown = HitBreakdown::compute(&request.vector, request.published_at);
        assert!((breakdown.probability - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vector_fields_sit_at_top_level() {
        let request: HitProbabilityRequest = serde_json::from_str(
            r#"{
                "hook": {"score": 9, "type": "curiosity"},
                "genre": {"score": 8, "trending": true},
                "published_at": "2025-06-07T12:00:00Z"
            }"#,
        )
        .expect("valid request");
        assert_eq!(request.vector.hook.score, Some(9));
        assert!(request.vector.genre.trending);
        assert!(request.published_at.is_some());
    }
}
