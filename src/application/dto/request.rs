//! Request DTOs
//!
//! Data structures for API request bodies. Required fields are deserialized
//! as `Option` so a missing key surfaces as a domain validation failure
//! (400 with the uniform error body) instead of a deserializer rejection.

use serde::Deserialize;
use validator::Validate;

use crate::domain::{
    CustomerPatch, FuelType, NewCustomer, NewSale, NewTestDrive, NewVehicle, SalePatch,
    TestDrivePatch, Transmission, VehicleStatus,
};
use crate::shared::error::AppError;
use crate::shared::validation::{parse_date, parse_uuid};

/// Treat an absent or empty optional string as NULL.
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Create customer request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    #[serde(default)]
    pub ph_number: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub driving_licence: Option<String>,
}

impl CreateCustomerRequest {
    pub fn into_domain(self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            address: none_if_empty(self.address),
            ph_number: self.ph_number.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            driving_licence: self.driving_licence.unwrap_or_default(),
        }
    }
}

/// Partial customer update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    pub ph_number: Option<String>,
    pub email: Option<String>,
    pub driving_licence: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn into_domain(self) -> CustomerPatch {
        CustomerPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            ph_number: self.ph_number,
            email: self.email,
            driving_licence: self.driving_licence,
        }
    }
}

/// Create or replace vehicle request
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    #[serde(default)]
    #[validate(length(max = 32, message = "VIN must be at most 32 characters"))]
    pub vin: Option<String>,

    #[serde(default)]
    pub make: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub odometer: Option<i32>,

    #[serde(default)]
    pub fuel_type: Option<String>,

    #[serde(default)]
    pub transmission: Option<String>,

    #[serde(default)]
    pub trim: Option<String>,

    #[serde(default)]
    pub market_price: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,
}

impl VehicleRequest {
    pub fn try_into_domain(self) -> Result<NewVehicle, AppError> {
        let (Some(vin), Some(make), Some(model)) = (self.vin, self.make, self.model) else {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        };
        let (Some(year), Some(odometer), Some(market_price)) =
            (self.year, self.odometer, self.market_price)
        else {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        };

        let fuel_type = self
            .fuel_type
            .as_deref()
            .and_then(FuelType::parse)
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "Invalid fuel_type. Expected one of GAS, DIESEL, ELECTRIC, HYBRID.".into(),
                )
            })?;
        let transmission = self
            .transmission
            .as_deref()
            .and_then(Transmission::parse)
            .ok_or_else(|| {
                AppError::InvalidInput("Invalid transmission. Expected AUTOMATIC or MANUAL.".into())
            })?;
        let status = self
            .status
            .as_deref()
            .and_then(VehicleStatus::parse)
            .ok_or_else(|| {
                AppError::InvalidInput("Invalid status. Expected AVAILABLE or SOLD.".into())
            })?;

        Ok(NewVehicle {
            vin,
            make,
            model,
            year,
            odometer,
            fuel_type,
            transmission,
            trim: none_if_empty(self.trim),
            market_price,
            status,
        })
    }
}

/// Create sale request
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    #[serde(default)]
    pub vehicle_id: Option<String>,

    #[serde(default)]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl CreateSaleRequest {
    pub fn try_into_domain(self) -> Result<NewSale, AppError> {
        let vehicle_id = self
            .vehicle_id
            .as_deref()
            .map(|v| parse_uuid(v, "vehicle"))
            .transpose()?
            .ok_or_else(|| AppError::InvalidInput("Missing required fields".into()))?;
        let customer_id = self
            .customer_id
            .as_deref()
            .map(|c| parse_uuid(c, "customer"))
            .transpose()?
            .ok_or_else(|| AppError::InvalidInput("Missing required fields".into()))?;
        let date = self
            .date
            .as_deref()
            .map(parse_date)
            .transpose()?
            .ok_or_else(|| AppError::InvalidInput("Missing required fields".into()))?;
        let sale_price = self
            .sale_price
            .ok_or_else(|| AppError::InvalidInput("Missing required fields".into()))?;

        Ok(NewSale {
            vehicle_id,
            customer_id,
            date,
            sale_price,
        })
    }
}

/// Partial sale update request
#[derive(Debug, Deserialize)]
pub struct UpdateSaleRequest {
    pub sale_price: Option<f64>,
    pub date: Option<String>,
}

impl UpdateSaleRequest {
    pub fn try_into_domain(self) -> Result<SalePatch, AppError> {
        Ok(SalePatch {
            sale_price: self.sale_price,
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// Book test drive request.
///
/// Keys are camelCase, matching what the frontend has always sent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestDriveRequest {
    #[serde(default)]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub vehicle_id: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl CreateTestDriveRequest {
    pub fn try_into_domain(self) -> Result<NewTestDrive, AppError> {
        let (Some(customer_id), Some(vehicle_id), Some(date)) =
            (self.customer_id, self.vehicle_id, self.date)
        else {
            return Err(AppError::InvalidInput(
                "Missing required fields: customerId, vehicleId, date".into(),
            ));
        };

        Ok(NewTestDrive {
            customer_id: parse_uuid(&customer_id, "customer")?,
            vehicle_id: parse_uuid(&vehicle_id, "vehicle")?,
            date: parse_date(&date)?,
            comments: none_if_empty(self.comment),
        })
    }
}

/// Partial test drive update request
#[derive(Debug, Deserialize)]
pub struct UpdateTestDriveRequest {
    pub date: Option<String>,
    pub comment: Option<String>,
}

impl UpdateTestDriveRequest {
    pub fn try_into_domain(self) -> Result<TestDrivePatch, AppError> {
        Ok(TestDrivePatch {
            date: self.date.as_deref().map(parse_date).transpose()?,
            comment: self.comment,
        })
    }
}

/// Weekly report query parameters
#[derive(Debug, Deserialize)]
pub struct ReportRangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}
