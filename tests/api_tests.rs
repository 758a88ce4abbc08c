//! Handler API Tests
//!
//! Drives the full router through tower's `oneshot` and checks status
//! codes and the uniform error body for every validation path, which all
//! run before a database connection is taken.

mod common;

use axum::http::StatusCode;

use common::{body_json, TestApp};

const CUSTOMER_ID: &str = "0c7f9dd2-4bb4-4f3e-bbcf-19a6a2a8b2a4";

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn get_customer_with_malformed_id_is_400() {
    let app = TestApp::new();

    let response = app.get("/customers/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid customer id");
}

#[tokio::test]
async fn create_customer_with_missing_fields_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json("/customers", r#"{"first_name": "Jane"}"#)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn create_customer_with_invalid_email_is_400() {
    let app = TestApp::new();

    let body = r#"{
        "first_name": "Jane", "last_name": "Doe",
        "ph_number": "5195551234", "email": "jane-at-example.com",
        "driving_licence": "ON-12345678"
    }"#;
    let response = app.post_json("/customers", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid email format");
}

#[tokio::test]
async fn create_customer_with_bad_phone_is_400() {
    let app = TestApp::new();

    let body = r#"{
        "first_name": "Jane", "last_name": "Doe",
        "ph_number": "519-555-1234", "email": "jane@example.com",
        "driving_licence": "ON-12345678"
    }"#;
    let response = app.post_json("/customers", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_customer_with_no_fields_is_400() {
    let app = TestApp::new();

    let response = app
        .patch_json(&format!("/customers/{CUSTOMER_ID}"), "{}")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No fields provided for update");
}

#[tokio::test]
async fn create_sale_with_negative_price_is_400() {
    let app = TestApp::new();

    let body = format!(
        r#"{{"vehicle_id": "{CUSTOMER_ID}", "customer_id": "{CUSTOMER_ID}",
            "date": "2025-06-15", "sale_price": -5}}"#
    );
    let response = app.post_json("/sales", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Sale price must be positive");
}

#[tokio::test]
async fn create_sale_with_malformed_vehicle_id_is_400() {
    let app = TestApp::new();

    let body = format!(
        r#"{{"vehicle_id": "garage", "customer_id": "{CUSTOMER_ID}",
            "date": "2025-06-15", "sale_price": 100}}"#
    );
    let response = app.post_json("/sales", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid vehicle id");
}

#[tokio::test]
async fn create_sale_with_calendar_invalid_date_is_400() {
    let app = TestApp::new();

    let body = format!(
        r#"{{"vehicle_id": "{CUSTOMER_ID}", "customer_id": "{CUSTOMER_ID}",
            "date": "2025-02-30", "sale_price": 100}}"#
    );
    let response = app.post_json("/sales", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_vehicle_with_out_of_range_year_is_400() {
    let app = TestApp::new();

    let body = r#"{
        "vin": "VIN123", "make": "Honda", "model": "Accord",
        "year": 1700, "odometer": 1000,
        "fuel_type": "GAS", "transmission": "MANUAL",
        "market_price": 10000, "status": "AVAILABLE"
    }"#;
    let response = app.post_json("/vehicles", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_vehicle_with_unknown_fuel_type_is_400() {
    let app = TestApp::new();

    let body = r#"{
        "vin": "VIN123", "make": "Honda", "model": "Accord",
        "year": 2020, "odometer": 1000,
        "fuel_type": "STEAM", "transmission": "MANUAL",
        "market_price": 10000, "status": "AVAILABLE"
    }"#;
    let response = app.post_json("/vehicles", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid fuel_type. Expected one of GAS, DIESEL, ELECTRIC, HYBRID."
    );
}

#[tokio::test]
async fn update_vehicle_with_malformed_id_is_400() {
    let app = TestApp::new();

    let body = r#"{
        "vin": "VIN123", "make": "Honda", "model": "Accord",
        "year": 2020, "odometer": 1000,
        "fuel_type": "GAS", "transmission": "MANUAL",
        "market_price": 10000, "status": "AVAILABLE"
    }"#;
    let response = app.put_json("/vehicles/forty-two", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weekly_report_with_inverted_range_is_400() {
    let app = TestApp::new();

    let response = app
        .get("/sales/weekly-report?start=2025-06-15&end=2025-06-01")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid date range: start is after end");
}

#[tokio::test]
async fn weekly_report_without_params_is_400() {
    let app = TestApp::new();

    let response = app.get("/sales/weekly-report").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_test_drive_with_missing_fields_is_400() {
    let app = TestApp::new();

    let response = app
        .post_json("/test-drives", r#"{"comment": "no ids"}"#)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_test_drive_with_no_fields_is_400() {
    let app = TestApp::new();

    let response = app
        .patch_json(&format!("/test-drives/{CUSTOMER_ID}"), "{}")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_pool_surfaces_as_503() {
    // The test pool has no connections; a handler that reaches the
    // database fails with the pool-exhausted deadline instead of hanging.
    let app = TestApp::new();

    let response = app.get("/customers").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Connection pool exhausted");
}
