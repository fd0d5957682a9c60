use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult, models::NearbyResponse, routes::AppState, services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    radius_meters: Option<f64>,
}

/// Handler listing the customers around a given customer, for map rendering
pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i64>,
    Query(params): Query<NearbyQuery>,
) -> AppResult<Json<NearbyResponse>> {
    let radius_meters = state.resolve_radius(params.radius_meters)?;
    let snapshot = state.store.snapshot().await;

    let response = recommendations::nearby_customers(&snapshot, customer_id, radius_meters)?;
    Ok(Json(response))
}
