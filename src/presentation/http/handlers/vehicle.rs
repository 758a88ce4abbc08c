//! Vehicle (Inventory) Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::VehicleRequest;
use crate::application::dto::response::VehicleListItem;
use crate::domain::Vehicle;
use crate::infrastructure::repositories::vehicle_repository;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_uuid, validation_error};
use crate::startup::AppState;

/// List the full inventory
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleListItem>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let vehicles = vehicle_repository::find_all(&mut conn).await?;

    Ok(Json(vehicles.into_iter().map(VehicleListItem::new).collect()))
}

/// List vehicles still on the lot
pub async fn list_available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleListItem>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let vehicles = vehicle_repository::find_available(&mut conn).await?;

    Ok(Json(vehicles.into_iter().map(VehicleListItem::new).collect()))
}

/// Get vehicle by ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let id = parse_uuid(&id, "vehicle")?;

    let mut conn = state.db.acquire().await?;
    let vehicle = vehicle_repository::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

    Ok(Json(vehicle))
}

/// Add a vehicle to the inventory
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(body): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    body.validate().map_err(validation_error)?;

    let new_vehicle = body.try_into_domain()?;
    new_vehicle.validate()?;

    let mut conn = state.db.acquire().await?;
    let created = vehicle_repository::create(&mut conn, &new_vehicle).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace all fields of a vehicle
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let id = parse_uuid(&id, "vehicle")?;
    body.validate().map_err(validation_error)?;

    let new_vehicle = body.try_into_domain()?;
    new_vehicle.validate()?;

    let mut conn = state.db.acquire().await?;
    let updated = vehicle_repository::update(&mut conn, id, &new_vehicle)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

    Ok(Json(updated))
}
