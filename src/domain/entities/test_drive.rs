//! Test-drive booking entity.
//!
//! Maps to the `test_drive_record` table in the database schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a scheduled test drive.
///
/// Maps to the `test_drive_record` table:
/// - id: UUID PRIMARY KEY
/// - customer_id: UUID NOT NULL REFERENCES customers(id)
/// - vehicle_id: UUID NOT NULL REFERENCES vehicles(id)
/// - date: DATE NOT NULL
/// - comments: TEXT NULL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TestDrive {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub comments: Option<String>,
}

/// One row of the test-drive listing, joined with customer and vehicle.
///
/// Serialized with the camelCase keys the frontend has always consumed.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TestDriveDetail {
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub make: String,
    pub model: String,
    pub date: NaiveDate,
    pub comment: Option<String>,
}

/// Fields for booking a test drive.
#[derive(Debug, Clone)]
pub struct NewTestDrive {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub comments: Option<String>,
}

/// Partial update for a booking: date and/or comment.
#[derive(Debug, Clone, Default)]
pub struct TestDrivePatch {
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
}

impl TestDrivePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.comment.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::InvalidInput(
                "No updatable fields provided. At least one of 'date' or 'comment' must be provided."
                    .into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_rejected() {
        assert!(TestDrivePatch::default().validate().is_err());
    }

    #[test]
    fn test_patch_with_comment_only_accepted() {
        let patch = TestDrivePatch {
            comment: Some("Customer liked the handling".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
