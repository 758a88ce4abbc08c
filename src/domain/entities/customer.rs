//! Customer entity.
//!
//! Maps to the `customers` table in the database schema.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;
use crate::shared::validation::{is_valid_email, is_valid_licence, is_valid_phone};

/// Represents a dealership customer.
///
/// Maps to the `customers` table:
/// - id: UUID PRIMARY KEY
/// - first_name: VARCHAR NOT NULL
/// - last_name: VARCHAR NOT NULL
/// - address: TEXT NULL
/// - ph_number: VARCHAR(10) NOT NULL
/// - email: VARCHAR NOT NULL UNIQUE
/// - driving_licence: VARCHAR(11) NOT NULL UNIQUE
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub ph_number: String,
    pub email: String,
    pub driving_licence: String,
}

/// Fields for creating a customer. Address is optional; an empty or absent
/// address is stored as NULL.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub ph_number: String,
    pub email: String,
    pub driving_licence: String,
}

impl NewCustomer {
    /// Validate all business rules before any connection is taken.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.ph_number.is_empty()
            || self.email.is_empty()
            || self.driving_licence.is_empty()
        {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        }
        if !is_valid_phone(&self.ph_number) {
            return Err(AppError::InvalidInput(
                "Phone number must be exactly 10 digits".into(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }
        if !is_valid_licence(&self.driving_licence) {
            return Err(AppError::InvalidInput(
                "Driving licence must match AA-12345678".into(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a customer.
///
/// A `Some` field overwrites the stored value; `None` leaves it untouched.
/// A `Some("")` clears the address (nullable) and is rejected for the
/// required fields.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub ph_number: Option<String>,
    pub email: Option<String>,
    pub driving_licence: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.address.is_none()
            && self.ph_number.is_none()
            && self.email.is_none()
            && self.driving_licence.is_none()
    }
}

impl Customer {
    /// Merge a patch over the existing record and validate the result.
    pub fn apply_patch(&self, patch: &CustomerPatch) -> Result<Customer, AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput("No fields provided for update".into()));
        }

        let merged = Customer {
            id: self.id,
            first_name: patch.first_name.clone().unwrap_or_else(|| self.first_name.clone()),
            last_name: patch.last_name.clone().unwrap_or_else(|| self.last_name.clone()),
            address: match &patch.address {
                // Empty string clears the nullable address.
                Some(a) if a.is_empty() => None,
                Some(a) => Some(a.clone()),
                None => self.address.clone(),
            },
            ph_number: patch.ph_number.clone().unwrap_or_else(|| self.ph_number.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            driving_licence: patch
                .driving_licence
                .clone()
                .unwrap_or_else(|| self.driving_licence.clone()),
        };

        let as_new = NewCustomer {
            first_name: merged.first_name.clone(),
            last_name: merged.last_name.clone(),
            address: merged.address.clone(),
            ph_number: merged.ph_number.clone(),
            email: merged.email.clone(),
            driving_licence: merged.driving_licence.clone(),
        };
        as_new.validate()?;

        Ok(merged)
    }
}
