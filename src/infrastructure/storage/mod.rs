//! Image File Storage
//!
//! Writes uploaded vehicle images to the configured uploads directory and
//! removes them when their metadata row is deleted. Files are served back
//! by the static file layer; the database only ever sees the public URL.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Public URL prefix under which stored files are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Filesystem store for uploaded vehicle images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = dir.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| AppError::Internal(format!("cannot create uploads dir: {e}")))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an uploaded image and return its public URL.
    ///
    /// Filenames embed the vehicle id and a timestamp so repeated uploads
    /// for the same vehicle never collide.
    pub async fn save(
        &self,
        vehicle_id: Uuid,
        extension: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let filename = format!("{}_{}.{}", vehicle_id, Utc::now().timestamp_millis(), extension);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to save file: {e}")))?;

        Ok(format!("{UPLOADS_URL_PREFIX}/{filename}"))
    }

    /// Remove the stored file behind a public URL.
    ///
    /// A missing file is not an error: the row is already gone and the
    /// remaining cleanup is best-effort.
    pub async fn remove(&self, img_url: &str) {
        let Some(filename) = img_url.strip_prefix(&format!("{UPLOADS_URL_PREFIX}/")) else {
            tracing::warn!(img_url, "refusing to remove file outside uploads prefix");
            return;
        };
        // The stored URL is server-generated, but guard traversal anyway.
        if filename.contains('/') || filename.contains("..") {
            tracing::warn!(img_url, "refusing suspicious upload path");
            return;
        }

        let path = self.root.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove image file");
            }
        }
    }
}

/// Map an uploaded content type to the stored file extension.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        _ => "jpg",
    }
}
