use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::catalog::AreaCatalog;
use super::domain::FeatureTag;
use super::service::{RecommendationError, RecommendationService};
use super::wire::{AnalyzeRequest, AreaAdviceRequest, PlannerRequest, SalaryAnalysisRequest};

const ANALYZE_FAILURE: &str = "分析中にエラーが発生しました";
const GENERIC_FAILURE: &str = "Internal Server Error";

/// Router builder exposing the recommendation endpoints.
pub fn recommendation_router<C>(service: Arc<RecommendationService<C>>) -> Router
where
    C: AreaCatalog + 'static,
{
    Router::new()
        .route("/api/analyze", post(analyze_handler::<C>))
        .route("/api/analyze/advice", post(salary_analysis_handler::<C>))
        .route("/api/planner", post(planner_handler::<C>))
        .route("/api/planner/advice", post(area_advice_handler::<C>))
        .route("/api/prefectures", get(prefectures_handler::<C>))
        .route("/api/features", get(features_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response
where
    C: AreaCatalog + 'static,
{
    match service.analyze(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => failure_response(err, "analyze", ANALYZE_FAILURE),
    }
}

pub(crate) async fn planner_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    Json(request): Json<PlannerRequest>,
) -> Response
where
    C: AreaCatalog + 'static,
{
    match service.plan(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => failure_response(err, "planner", GENERIC_FAILURE),
    }
}

pub(crate) async fn area_advice_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    Json(request): Json<AreaAdviceRequest>,
) -> Response
where
    C: AreaCatalog + 'static,
{
    let response = service.area_advice(request).await;
    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn salary_analysis_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    Json(request): Json<SalaryAnalysisRequest>,
) -> Response
where
    C: AreaCatalog + 'static,
{
    let response = service.salary_analysis(request).await;
    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn prefectures_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
) -> Response
where
    C: AreaCatalog + 'static,
{
    match service.prefectures().await {
        Ok(regions) => (StatusCode::OK, Json(regions)).into_response(),
        Err(err) => failure_response(err, "prefectures", GENERIC_FAILURE),
    }
}

pub(crate) async fn features_handler() -> Response {
    let features: Vec<_> = FeatureTag::KNOWN
        .iter()
        .map(|tag| {
            json!({
                "id": tag.as_str(),
                "label": tag.label(),
                "description": tag.description(),
            })
        })
        .collect();
    (StatusCode::OK, Json(features)).into_response()
}

/// Validation failures are echoed; everything else is logged and replaced by `generic`.
fn failure_response(
    err: RecommendationError,
    operation: &'static str,
    generic: &'static str,
) -> Response {
    match err {
        RecommendationError::Validation(validation) => {
            let payload = json!({ "error": validation.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        other => {
            error!(error = %other, operation, "recommendation request failed");
            let payload = json!({ "error": generic });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
