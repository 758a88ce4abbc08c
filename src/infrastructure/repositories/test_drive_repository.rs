//! Test Drive Repository
//!
//! Stateless data-access functions for the `test_drive_record` table.

use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::domain::{NewTestDrive, TestDrive, TestDriveDetail, TestDrivePatch, VehicleStatus};
use crate::shared::error::AppError;

const DETAIL_SELECT: &str = "SELECT \
    t.id, c.first_name, c.last_name, v.make, v.model, t.date, t.comments AS comment \
    FROM test_drive_record t \
    JOIN customers c ON t.customer_id = c.id \
    JOIN vehicles v ON t.vehicle_id = v.id";

/// All bookings, joined with customer and vehicle.
pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<TestDriveDetail>, AppError> {
    let mut tx = conn.begin().await?;

    let bookings =
        sqlx::query_as::<_, TestDriveDetail>(&format!("{DETAIL_SELECT} ORDER BY t.date ASC"))
            .fetch_all(&mut *tx)
            .await?;

    tx.commit().await?;
    Ok(bookings)
}

/// One booking by id.
pub async fn find_by_id(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<TestDriveDetail>, AppError> {
    let mut tx = conn.begin().await?;

    let booking = sqlx::query_as::<_, TestDriveDetail>(&format!("{DETAIL_SELECT} WHERE t.id = $1"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(booking)
}

/// All bookings made by one customer.
pub async fn find_by_customer(
    conn: &mut PgConnection,
    customer_id: Uuid,
) -> Result<Vec<TestDriveDetail>, AppError> {
    let mut tx = conn.begin().await?;

    let bookings = sqlx::query_as::<_, TestDriveDetail>(&format!(
        "{DETAIL_SELECT} WHERE t.customer_id = $1 ORDER BY t.date ASC"
    ))
    .bind(customer_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(bookings)
}

/// All bookings for one vehicle.
pub async fn find_by_vehicle(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
) -> Result<Vec<TestDriveDetail>, AppError> {
    let mut tx = conn.begin().await?;

    let bookings = sqlx::query_as::<_, TestDriveDetail>(&format!(
        "{DETAIL_SELECT} WHERE t.vehicle_id = $1 ORDER BY t.date ASC"
    ))
    .bind(vehicle_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(bookings)
}

/// Book a test drive.
///
/// A sold vehicle cannot be booked; the status check and the insert share
/// one transaction so the decision is made against a consistent snapshot.
pub async fn create(conn: &mut PgConnection, new: &NewTestDrive) -> Result<TestDrive, AppError> {
    let mut tx = conn.begin().await?;

    let status = sqlx::query_scalar::<_, String>("SELECT status FROM vehicles WHERE id = $1")
        .bind(new.vehicle_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

    if VehicleStatus::parse(&status) == Some(VehicleStatus::Sold) {
        return Err(AppError::Conflict(
            "Vehicle is already sold. Cannot schedule test drive.".into(),
        ));
    }

    let booking = sqlx::query_as::<_, TestDrive>(
        "INSERT INTO test_drive_record (customer_id, vehicle_id, date, comments) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, customer_id, vehicle_id, date, comments",
    )
    .bind(new.customer_id)
    .bind(new.vehicle_id)
    .bind(new.date)
    .bind(&new.comments)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::from_db)?;

    tx.commit().await?;
    Ok(booking)
}

/// Update date and/or comment of a booking. Returns `None` when the id
/// matches no row.
pub async fn patch(
    conn: &mut PgConnection,
    id: Uuid,
    update: &TestDrivePatch,
) -> Result<Option<TestDrive>, AppError> {
    let mut tx = conn.begin().await?;

    let booking = sqlx::query_as::<_, TestDrive>(
        "UPDATE test_drive_record \
         SET date = COALESCE($1, date), comments = COALESCE($2, comments) \
         WHERE id = $3 \
         RETURNING id, customer_id, vehicle_id, date, comments",
    )
    .bind(update.date)
    .bind(&update.comment)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(booking)
}
