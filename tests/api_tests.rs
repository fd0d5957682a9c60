use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use nearby_recs::{
    config::Config,
    db::DatasetStore,
    models::RawTransaction,
    routes::{create_router, AppState},
    services::sources::MemorySource,
};

fn sale(customer_id: i64, product_id: i64, quantity: i64, sale_value: f64, lat: f64) -> RawTransaction {
    RawTransaction {
        customer_id: Some(customer_id),
        product_id: Some(product_id),
        product_name: Some(format!("Producto {}", product_id)),
        quantity: Some(quantity),
        sale_value: Some(sale_value),
        product_line: Some("ABARROTES".to_string()),
        latitude: Some(lat),
        longitude: Some(-74.08),
    }
}

fn rows() -> Vec<RawTransaction> {
    vec![
        sale(1, 10, 3, 30.0, 4.6000),
        sale(1, 10, 3, 30.0, 4.6000),
        sale(2, 10, 5, 50.0, 4.6005),
        sale(2, 20, 7, 200.0, 4.6005),
        sale(2, 30, 7, 50.0, 4.6005),
        // About 11 km north of customers 1 and 2
        sale(3, 40, 2, 20.0, 4.7000),
        RawTransaction {
            product_line: Some("BONIFICACION 77".to_string()),
            ..sale(4, 99, 1, 1.0, 4.6001)
        },
    ]
}

async fn create_test_server() -> TestServer {
    let source = Arc::new(MemorySource::new(rows()));
    let config = Config::default();

    let store = DatasetStore::default();
    store
        .reload(source.as_ref(), &config.excluded_product_lines)
        .await
        .unwrap();

    let app = create_router(AppState::new(store, source, config));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommendations_from_nearby_customers() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "customer_id": 1, "radius_meters": 1000 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["strategy"], "nearby_purchases");
    assert_eq!(body["nearby"]["customer_ids"], json!([2, 2, 2]));

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    // Equal modal quantity, higher total sale value first
    assert_eq!(recs[0]["product_id"], 20);
    assert_eq!(recs[0]["modal_quantity"], 7);
    assert_eq!(recs[0]["total_sale_value"], 200.0);
    assert_eq!(recs[1]["product_id"], 30);
}

#[tokio::test]
async fn test_recommendations_fall_back_to_own_history() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "customer_id": 3, "radius_meters": 1000 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["strategy"], "own_history");
    assert_eq!(body["nearby"]["customer_ids"], json!([]));
    assert_eq!(body["recommendations"][0]["product_id"], 40);
    assert!(body["recommendations"][0].get("total_sale_value").is_none());
}

#[tokio::test]
async fn test_recommendations_respect_top_n() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "customer_id": 3, "radius_meters": 20000, "top_n": 2 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let ids: Vec<i64> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["product_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![20, 30]);
}

#[tokio::test]
async fn test_unknown_customer_returns_not_found() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "customer_id": 777 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "customer_not_found");
}

#[tokio::test]
async fn test_radius_outside_bounds_is_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "customer_id": 1, "radius_meters": 10 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn test_nearby_customers_endpoint() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/customers/3/nearby")
        .add_query_param("radius_meters", 20000)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["location"]["latitude"], 4.7);
    assert_eq!(body["nearby"]["customer_ids"], json!([1, 1, 2, 2, 2]));
    assert_eq!(body["nearby"]["locations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_product_frequency_excludes_filtered_lines() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/products/frequency").await;

    response.assert_status_ok();
    let summary: Vec<Value> = response.json();
    assert_eq!(summary.len(), 4);
    assert_eq!(summary[0]["product_id"], 10);
    assert_eq!(summary[0]["modal_quantity"], 3);
    assert!(summary.iter().all(|row| row["product_id"] != 99));
}

#[tokio::test]
async fn test_dataset_reload_increments_generation() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/dataset").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["generation"], 1);
    assert_eq!(stats["transaction_count"], 6);
    assert_eq!(stats["customer_count"], 3);

    let response = server.post("/api/v1/dataset/reload").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["generation"], 2);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server().await;
    let request_id = "2f1c7c7e-4d4b-4a53-9d0e-8f2b8e6f1a10";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id);
}
