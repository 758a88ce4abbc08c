//! Test Drive Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateTestDriveRequest, UpdateTestDriveRequest};
use crate::domain::{TestDrive, TestDriveDetail};
use crate::infrastructure::repositories::test_drive_repository;
use crate::shared::error::AppError;
use crate::shared::validation::parse_uuid;
use crate::startup::AppState;

/// List all test-drive bookings
pub async fn list_test_drives(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestDriveDetail>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let bookings = test_drive_repository::find_all(&mut conn).await?;
    Ok(Json(bookings))
}

/// Get a booking by ID
pub async fn get_test_drive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestDriveDetail>, AppError> {
    let id = parse_uuid(&id, "test drive")?;

    let mut conn = state.db.acquire().await?;
    let booking = test_drive_repository::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test drive not found".into()))?;

    Ok(Json(booking))
}

/// List bookings made by one customer
pub async fn list_test_drives_for_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Vec<TestDriveDetail>>, AppError> {
    let customer_id = parse_uuid(&customer_id, "customer")?;

    let mut conn = state.db.acquire().await?;
    let bookings = test_drive_repository::find_by_customer(&mut conn, customer_id).await?;
    if bookings.is_empty() {
        return Err(AppError::NotFound(
            "No test drive found for the given customer ID.".into(),
        ));
    }

    Ok(Json(bookings))
}

/// List bookings for one vehicle
pub async fn list_test_drives_for_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<TestDriveDetail>>, AppError> {
    let vehicle_id = parse_uuid(&vehicle_id, "vehicle")?;

    let mut conn = state.db.acquire().await?;
    let bookings = test_drive_repository::find_by_vehicle(&mut conn, vehicle_id).await?;
    if bookings.is_empty() {
        return Err(AppError::NotFound(
            "No test drive found for the given vehicle ID.".into(),
        ));
    }

    Ok(Json(bookings))
}

/// Book a test drive
pub async fn create_test_drive(
    State(state): State<AppState>,
    Json(body): Json<CreateTestDriveRequest>,
) -> Result<(StatusCode, Json<TestDrive>), AppError> {
    let booking = body.try_into_domain()?;

    let mut conn = state.db.acquire().await?;
    let created = test_drive_repository::create(&mut conn, &booking).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update date and/or comment of a booking
pub async fn patch_test_drive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTestDriveRequest>,
) -> Result<Json<TestDrive>, AppError> {
    let id = parse_uuid(&id, "test drive")?;

    let patch = body.try_into_domain()?;
    patch.validate()?;

    let mut conn = state.db.acquire().await?;
    let updated = test_drive_repository::patch(&mut conn, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Test drive not found".into()))?;

    Ok(Json(updated))
}
