//! Sale entity.
//!
//! Maps to the `sales` table in the database schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Upper bound on a single sale. Prices past this are treated as input
/// mistakes, not as a systems limit.
pub const MAX_SALE_PRICE: f64 = 1_000_000.0;

/// Represents a completed sales transaction.
///
/// Maps to the `sales` table:
/// - id: UUID PRIMARY KEY
/// - vehicle_id: UUID NOT NULL REFERENCES vehicles(id)
/// - customer_id: UUID NOT NULL REFERENCES customers(id)
/// - date: DATE NOT NULL
/// - sale_price: DOUBLE PRECISION NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub sale_price: f64,
}

/// Fields for recording a sale.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub sale_price: f64,
}

/// Validate a sale price against the business bounds.
pub fn validate_sale_price(price: f64) -> Result<(), AppError> {
    if price <= 0.0 {
        return Err(AppError::InvalidInput("Sale price must be positive".into()));
    }
    if price > MAX_SALE_PRICE {
        return Err(AppError::InvalidInput(format!(
            "Sale price cannot exceed {MAX_SALE_PRICE}"
        )));
    }
    Ok(())
}

impl NewSale {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_sale_price(self.sale_price)
    }
}

/// One row of the sales listing, joined with vehicle and customer names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleSummary {
    pub sale_id: Uuid,
    pub date: NaiveDate,
    pub price: f64,
    /// "Make Model"
    pub vehicle: String,
    /// "First Last"
    pub customer: String,
}

/// One row of the weekly sales report: the summary plus the margin over
/// the vehicle's listed market price.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleReportEntry {
    pub sale_id: Uuid,
    pub date: NaiveDate,
    pub price: f64,
    pub vehicle: String,
    pub customer: String,
    pub profit: f64,
}

/// Invoice detail for a single sale.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleInvoice {
    pub sale_id: Uuid,
    pub date: NaiveDate,
    pub sale_price: f64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub ph_number: String,
    pub email: String,
}

/// Partial update for a sale: price and/or date.
#[derive(Debug, Clone, Default)]
pub struct SalePatch {
    pub sale_price: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl SalePatch {
    pub fn is_empty(&self) -> bool {
        self.sale_price.is_none() && self.date.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::InvalidInput("No fields provided for update".into()));
        }
        if let Some(price) = self.sale_price {
            validate_sale_price(price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.01, true; "smallest positive")]
    #[test_case(28_500.0, true; "typical")]
    #[test_case(1_000_000.0, true; "at cap")]
    #[test_case(1_000_000.01, false; "past cap")]
    #[test_case(0.0, false; "zero")]
    #[test_case(-5.0, false; "negative")]
    fn test_sale_price_bounds(price: f64, ok: bool) {
        assert_eq!(validate_sale_price(price).is_ok(), ok);
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert!(SalePatch::default().validate().is_err());
    }

    #[test]
    fn test_patch_with_only_date_accepted() {
        let patch = SalePatch {
            date: Some(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_with_bad_price_rejected() {
        let patch = SalePatch {
            sale_price: Some(-5.0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
