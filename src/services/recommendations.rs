use std::time::Instant;

use crate::{
    db::DatasetSnapshot,
    error::{AppError, AppResult},
    models::{
        CustomerRecommendations, GeoPoint, NearbyCustomers, NearbyResponse,
        RecommendationStrategy,
    },
    services::{proximity, ranking},
};

/// Location of a customer's first recorded transaction
pub fn locate_customer(snapshot: &DatasetSnapshot, customer_id: i64) -> AppResult<GeoPoint> {
    snapshot
        .transactions
        .iter()
        .find(|t| t.customer_id == customer_id)
        .map(|t| t.location())
        .ok_or(AppError::CustomerNotFound(customer_id))
}

/// Other customers' transaction rows within `radius_meters` of the customer
///
/// The customer's own rows always fall inside the radius, so they are removed:
/// an empty result means nobody else is in range.
pub fn nearby_customers(
    snapshot: &DatasetSnapshot,
    customer_id: i64,
    radius_meters: f64,
) -> AppResult<NearbyResponse> {
    let location = locate_customer(snapshot, customer_id)?;
    let nearby = neighbours_of(snapshot, customer_id, location, radius_meters)?;

    Ok(NearbyResponse {
        customer_id,
        location,
        radius_meters,
        nearby,
    })
}

/// Runs the full recommendation pipeline for one customer
///
/// 1. Locate the customer
/// 2. Find other customers within the radius
/// 3. Rank with the cached frequency summary of the snapshot
pub fn recommend_for_customer(
    snapshot: &DatasetSnapshot,
    customer_id: i64,
    radius_meters: f64,
    top_n: usize,
) -> AppResult<CustomerRecommendations> {
    let start = Instant::now();

    let location = locate_customer(snapshot, customer_id)?;
    let nearby = neighbours_of(snapshot, customer_id, location, radius_meters)?;

    let strategy = if nearby.is_empty() {
        tracing::info!(customer_id, radius_meters, "No nearby customers, using own history");
        RecommendationStrategy::OwnHistory
    } else {
        RecommendationStrategy::NearbyPurchases
    };

    let recommendations = ranking::recommend(
        &snapshot.transactions,
        &snapshot.summary,
        customer_id,
        &nearby.customer_ids,
        top_n,
    )?;

    tracing::info!(
        customer_id,
        generation = snapshot.generation,
        nearby_rows = nearby.len(),
        strategy = ?strategy,
        recommended = recommendations.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations computed"
    );

    Ok(CustomerRecommendations {
        customer_id,
        location,
        radius_meters,
        nearby,
        strategy,
        recommendations,
        dataset_generation: snapshot.generation,
    })
}

fn neighbours_of(
    snapshot: &DatasetSnapshot,
    customer_id: i64,
    location: GeoPoint,
    radius_meters: f64,
) -> AppResult<NearbyCustomers> {
    let within = proximity::find_nearby(
        &snapshot.transactions,
        location.latitude,
        location.longitude,
        radius_meters,
    )?;
    Ok(within.without_customer(customer_id))
}
