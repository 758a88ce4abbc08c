//! Customer Repository
//!
//! Stateless data-access functions for the `customers` table. Each function
//! borrows a pooled connection and runs exactly one transaction; an error
//! propagated with `?` drops the transaction guard uncommitted.

use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::domain::{Customer, CustomerPatch, NewCustomer};
use crate::shared::error::AppError;

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, address, ph_number, email, driving_licence";

/// Fetch all customers, ordered by last name then first name.
pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Customer>, AppError> {
    let mut tx = conn.begin().await?;

    let customers = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY last_name ASC, first_name ASC"
    ))
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(customers)
}

/// Fetch a single customer by id.
pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Customer>, AppError> {
    let mut tx = conn.begin().await?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(customer)
}

/// Insert a new customer.
///
/// The caller validates before acquiring a connection; uniqueness on email
/// and driving licence is enforced by the backend and surfaces as
/// `DuplicateKey`.
pub async fn create(conn: &mut PgConnection, new: &NewCustomer) -> Result<Customer, AppError> {
    let mut tx = conn.begin().await?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "INSERT INTO customers (first_name, last_name, address, ph_number, email, driving_licence) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.address)
    .bind(&new.ph_number)
    .bind(&new.email)
    .bind(&new.driving_licence)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match AppError::from_db(e) {
        AppError::DuplicateKey(_) => AppError::DuplicateKey(
            "Customer with the same email or driving_licence already exists".into(),
        ),
        other => other,
    })?;

    tx.commit().await?;
    Ok(customer)
}

/// Partially update a customer.
///
/// Reads the existing row, merges the provided fields over it, validates the
/// merged record, then writes, all within one transaction.
pub async fn patch(
    conn: &mut PgConnection,
    id: Uuid,
    update: &CustomerPatch,
) -> Result<Customer, AppError> {
    let mut tx = conn.begin().await?;

    let existing = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

    let merged = existing.apply_patch(update)?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers \
         SET first_name = $1, last_name = $2, address = $3, ph_number = $4, \
             email = $5, driving_licence = $6 \
         WHERE id = $7 \
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(&merged.first_name)
    .bind(&merged.last_name)
    .bind(&merged.address)
    .bind(&merged.ph_number)
    .bind(&merged.email)
    .bind(&merged.driving_licence)
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match AppError::from_db(e) {
        AppError::DuplicateKey(_) => AppError::DuplicateKey(
            "Update violates uniqueness constraint (email or driving_licence already exists)"
                .into(),
        ),
        other => other,
    })?;

    tx.commit().await?;
    Ok(customer)
}
