use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::DatasetStore,
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::sources::TransactionSource,
};

pub mod customers;
pub mod dataset;
pub mod products;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub store: DatasetStore,
    pub source: Arc<dyn TransactionSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: DatasetStore, source: Arc<dyn TransactionSource>, config: Config) -> Self {
        Self {
            store,
            source,
            config,
        }
    }

    /// Applies the configured default and bounds to a requested radius
    pub fn resolve_radius(&self, requested: Option<f64>) -> AppResult<f64> {
        let radius = requested.unwrap_or(self.config.default_radius_meters);
        let bounds = self.config.min_radius_meters..=self.config.max_radius_meters;

        if !bounds.contains(&radius) {
            return Err(AppError::InvalidInput(format!(
                "radius_meters must lie within [{}, {}], got {}",
                bounds.start(),
                bounds.end(),
                radius
            )));
        }

        Ok(radius)
    }

    /// Applies the configured default and bounds to a requested result count
    pub fn resolve_top_n(&self, requested: Option<usize>) -> AppResult<usize> {
        let top_n = requested.unwrap_or(self.config.default_top_n);

        if top_n == 0 || top_n > self.config.max_top_n {
            return Err(AppError::InvalidInput(format!(
                "top_n must lie within [1, {}], got {}",
                self.config.max_top_n, top_n
            )));
        }

        Ok(top_n)
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dataset", get(dataset::stats))
        .route("/dataset/reload", post(dataset::reload))
        .route("/products/frequency", get(products::frequency))
        .route("/customers/:customer_id/nearby", get(customers::nearby))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
