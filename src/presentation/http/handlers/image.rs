//! Vehicle Image Handlers
//!
//! Multipart upload, listing and deletion. The handler coordinates the
//! file store and the metadata row; the cascade from vehicle deletion is
//! handled by the schema.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::domain::Image;
use crate::infrastructure::repositories::image_repository;
use crate::infrastructure::storage;
use crate::shared::error::AppError;
use crate::shared::validation::parse_uuid;
use crate::startup::AppState;

/// Upload an image for a vehicle
pub async fn upload_image(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Image>), AppError> {
    let vehicle_id = parse_uuid(&vehicle_id, "vehicle")?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::InvalidInput("No file uploaded".into()))?;

    let extension = storage::extension_for(field.content_type());
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {e}")))?;
    if data.is_empty() {
        return Err(AppError::InvalidInput("No file uploaded".into()));
    }

    let img_url = state.images.save(vehicle_id, extension, &data).await?;

    let mut conn = state.db.acquire().await?;
    let image = match image_repository::create(&mut conn, vehicle_id, &img_url).await {
        Ok(image) => image,
        Err(e) => {
            // The row never landed (unknown vehicle, backend failure);
            // don't leave the file orphaned.
            state.images.remove(&img_url).await;
            return Err(e);
        }
    };

    Ok((StatusCode::CREATED, Json(image)))
}

/// List all images for a vehicle
pub async fn list_images(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<Image>>, AppError> {
    let vehicle_id = parse_uuid(&vehicle_id, "vehicle")?;

    let mut conn = state.db.acquire().await?;
    let images = image_repository::find_for_vehicle(&mut conn, vehicle_id).await?;

    Ok(Json(images))
}

/// Delete an image and its stored file
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_uuid(&id, "image")?;

    let mut conn = state.db.acquire().await?;
    let image = image_repository::delete(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;
    drop(conn);

    state.images.remove(&image.img_url).await;

    Ok(StatusCode::NO_CONTENT)
}
