use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::ProductFrequencySummary, routes::AppState};

/// Handler returning the cached modal-quantity summary of every product
pub async fn frequency(State(state): State<Arc<AppState>>) -> Json<Vec<ProductFrequencySummary>> {
    let snapshot = state.store.snapshot().await;
    Json(snapshot.summary.clone())
}
