//! Vehicle image entity.
//!
//! Maps to the `images` table. Rows are deleted along with their vehicle
//! through the schema-level cascade; the stored binary is removed by the
//! storage collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one stored vehicle image.
///
/// Maps to the `images` table:
/// - id: UUID PRIMARY KEY
/// - vehicle_id: UUID NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE
/// - img_url: TEXT NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub img_url: String,
}
