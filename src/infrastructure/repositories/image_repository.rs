//! Image Repository
//!
//! Stateless data-access functions for the `images` table. Rows cascade
//! with their vehicle at the schema level; binary files belong to the
//! storage collaborator and are not touched here.

use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::domain::Image;
use crate::shared::error::AppError;

/// All images recorded for a vehicle.
pub async fn find_for_vehicle(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
) -> Result<Vec<Image>, AppError> {
    let mut tx = conn.begin().await?;

    let images = sqlx::query_as::<_, Image>(
        "SELECT id, vehicle_id, img_url FROM images WHERE vehicle_id = $1 ORDER BY id",
    )
    .bind(vehicle_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(images)
}

/// Record an uploaded image for a vehicle.
///
/// A foreign-key violation on `vehicle_id` surfaces as `NotFound`.
pub async fn create(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    img_url: &str,
) -> Result<Image, AppError> {
    let mut tx = conn.begin().await?;

    let image = sqlx::query_as::<_, Image>(
        "INSERT INTO images (vehicle_id, img_url) VALUES ($1, $2) \
         RETURNING id, vehicle_id, img_url",
    )
    .bind(vehicle_id)
    .bind(img_url)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::from_db)?;

    tx.commit().await?;
    Ok(image)
}

/// Delete an image row, returning its metadata so the caller can remove
/// the stored file. Returns `None` when the id matches no row.
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<Option<Image>, AppError> {
    let mut tx = conn.begin().await?;

    let image = sqlx::query_as::<_, Image>(
        "DELETE FROM images WHERE id = $1 RETURNING id, vehicle_id, img_url",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(image)
}
