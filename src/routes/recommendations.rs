use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{CustomerRecommendations, RecommendationRequest},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<CustomerRecommendations>> {
    let radius_meters = state.resolve_radius(request.radius_meters)?;
    let top_n = state.resolve_top_n(request.top_n)?;

    tracing::info!(
        request_id = %request_id,
        customer_id = request.customer_id,
        radius_meters,
        top_n,
        "Processing recommendation request"
    );

    let snapshot = state.store.snapshot().await;
    let response =
        recommendations::recommend_for_customer(&snapshot, request.customer_id, radius_meters, top_n)?;

    Ok(Json(response))
}
