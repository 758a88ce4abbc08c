//! Customer Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::domain::Customer;
use crate::infrastructure::repositories::customer_repository;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_uuid, validation_error};
use crate::startup::AppState;

/// List all customers
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let customers = customer_repository::find_all(&mut conn).await?;
    Ok(Json(customers))
}

/// Get customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_uuid(&id, "customer")?;

    let mut conn = state.db.acquire().await?;
    let customer = customer_repository::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

    Ok(Json(customer))
}

/// Create a new customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    body.validate().map_err(validation_error)?;

    // All field rules run before a connection is taken.
    let new_customer = body.into_domain();
    new_customer.validate()?;

    let mut conn = state.db.acquire().await?;
    let created = customer_repository::create(&mut conn, &new_customer).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a customer
pub async fn patch_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_uuid(&id, "customer")?;
    body.validate().map_err(validation_error)?;

    let patch = body.into_domain();
    if patch.is_empty() {
        // Nothing to merge, so no reason to take a connection.
        return Err(AppError::InvalidInput("No fields provided for update".into()));
    }

    let mut conn = state.db.acquire().await?;
    let updated = customer_repository::patch(&mut conn, id, &patch).await?;

    Ok(Json(updated))
}
