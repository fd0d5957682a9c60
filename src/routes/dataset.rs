use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::DatasetStats, routes::AppState,
};

/// Handler describing the dataset currently served
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<DatasetStats> {
    Json(state.store.snapshot().await.stats())
}

/// Handler that reloads the dataset from the configured source
pub async fn reload(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<DatasetStats>> {
    tracing::info!(request_id = %request_id, source = %state.source.name(), "Processing dataset reload");

    let snapshot = state
        .store
        .reload(state.source.as_ref(), &state.config.excluded_product_lines)
        .await?;

    Ok(Json(snapshot.stats()))
}
