//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(customer_routes())
        .merge(vehicle_routes())
        .merge(sale_routes())
        .merge(image_routes())
        .merge(test_drive_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        // Uploaded images are served as static files
        .nest_service("/uploads", ServeDir::new(state.images.root()))
        .with_state(state)
}

/// Customer routes
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(handlers::customer::list_customers).post(handlers::customer::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::customer::get_customer).patch(handlers::customer::patch_customer),
        )
        .route(
            "/customers/{id}/test-drives",
            get(handlers::test_drive::list_test_drives_for_customer),
        )
}

/// Inventory routes
fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles",
            get(handlers::vehicle::list_vehicles).post(handlers::vehicle::create_vehicle),
        )
        .route(
            "/vehicles/available",
            get(handlers::vehicle::list_available_vehicles),
        )
        .route(
            "/vehicles/{id}",
            get(handlers::vehicle::get_vehicle).put(handlers::vehicle::update_vehicle),
        )
        .route(
            "/vehicles/{id}/test-drives",
            get(handlers::test_drive::list_test_drives_for_vehicle),
        )
}

/// Sales routes, including the CSV exports
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sales",
            get(handlers::sale::list_sales).post(handlers::sale::create_sale),
        )
        .route("/sales/id/{id}", get(handlers::sale::get_sale_invoice))
        .route("/sales/{id}", put(handlers::sale::update_sale))
        .route("/sales/export/csv", get(handlers::sale::export_sales_csv))
        .route("/sales/weekly-report", get(handlers::sale::weekly_report_csv))
}

/// Vehicle image routes
fn image_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles/{id}/images",
            get(handlers::image::list_images).post(handlers::image::upload_image),
        )
        .route("/images/{id}", delete(handlers::image::delete_image))
}

/// Test drive routes
fn test_drive_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/test-drives",
            get(handlers::test_drive::list_test_drives).post(handlers::test_drive::create_test_drive),
        )
        .route(
            "/test-drives/{id}",
            get(handlers::test_drive::get_test_drive).patch(handlers::test_drive::patch_test_drive),
        )
}
