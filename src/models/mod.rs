use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod geo;
pub mod transaction;

pub use geo::{GeoPoint, NearbyCustomers};
pub use transaction::{ProductFrequencySummary, RawTransaction, TransactionRecord};

/// A ranked product suggestion returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub product_id: i64,
    pub product_name: String,
    pub modal_quantity: Option<u32>,
    /// Dataset-wide sum of sale value for the product; only set for nearby-purchase rankings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_sale_value: Option<f64>,
}

/// Which ranking branch produced a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStrategy {
    /// Nobody else was in range; the customer's own purchases ranked by modal quantity
    OwnHistory,
    /// Products bought nearby that the customer has not bought yet
    NearbyPurchases,
}

/// Request body for the recommendation endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub customer_id: i64,
    #[serde(default)]
    pub radius_meters: Option<f64>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Full answer for one customer query: enough to draw a map and a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecommendations {
    pub customer_id: i64,
    pub location: GeoPoint,
    pub radius_meters: f64,
    pub nearby: NearbyCustomers,
    pub strategy: RecommendationStrategy,
    pub recommendations: Vec<RecommendationEntry>,
    pub dataset_generation: u64,
}

/// Response for the nearby-customers endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub customer_id: i64,
    pub location: GeoPoint,
    pub radius_meters: f64,
    pub nearby: NearbyCustomers,
}

/// Summary of the currently loaded dataset snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub generation: u64,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub transaction_count: usize,
    pub customer_count: usize,
    pub product_count: usize,
}
