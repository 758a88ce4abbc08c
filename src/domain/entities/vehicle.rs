//! Vehicle entity and inventory value enums.
//!
//! Maps to the `vehicles` table in the database schema.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Valid manufacturing-year window. 1886 is the year of the first car.
pub const MIN_YEAR: i32 = 1886;
pub const MAX_YEAR: i32 = 2100;

/// Fuel type matching the database VARCHAR constraint.
///
/// Canonical representation is UPPERCASE; parsing accepts any casing since
/// older tooling wrote mixed-case values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    Gas,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    /// Parse from a request or database string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GAS" => Some(Self::Gas),
            "DIESEL" => Some(Self::Diesel),
            "ELECTRIC" => Some(Self::Electric),
            "HYBRID" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gas => "GAS",
            Self::Diesel => "DIESEL",
            Self::Electric => "ELECTRIC",
            Self::Hybrid => "HYBRID",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transmission type matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AUTOMATIC" => Some(Self::Automatic),
            "MANUAL" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "AUTOMATIC",
            Self::Manual => "MANUAL",
        }
    }
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inventory status matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleStatus {
    Available,
    Sold,
}

impl VehicleStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Some(Self::Available),
            "SOLD" => Some(Self::Sold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Sold => "SOLD",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a vehicle in the dealership inventory.
///
/// Maps to the `vehicles` table:
/// - id: UUID PRIMARY KEY
/// - vin: VARCHAR NOT NULL
/// - make, model: VARCHAR NOT NULL
/// - year: INT NOT NULL
/// - odometer: INT NOT NULL
/// - fuel_type, transmission, status: VARCHAR NOT NULL
/// - trim: VARCHAR NULL
/// - market_price: DOUBLE PRECISION NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub odometer: i32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub trim: Option<String>,
    pub market_price: f64,
    pub status: VehicleStatus,
}

/// Fields for creating or replacing a vehicle.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub odometer: i32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub trim: Option<String>,
    pub market_price: f64,
    pub status: VehicleStatus,
}

impl NewVehicle {
    /// Validate range rules; enum fields are already type-checked by parsing.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.vin.is_empty() || self.make.is_empty() || self.model.is_empty() {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(AppError::InvalidInput(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}"
            )));
        }
        if self.odometer < 0 {
            return Err(AppError::InvalidInput("Odometer cannot be negative".into()));
        }
        if self.market_price <= 0.0 {
            return Err(AppError::InvalidInput("Market price must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid_vehicle() -> NewVehicle {
        NewVehicle {
            vin: "1HGCM82633A004352".into(),
            make: "Honda".into(),
            model: "Accord".into(),
            year: 2020,
            odometer: 45_000,
            fuel_type: FuelType::Gas,
            transmission: Transmission::Automatic,
            trim: Some("EX".into()),
            market_price: 18_500.0,
            status: VehicleStatus::Available,
        }
    }

    #[test]
    fn test_valid_vehicle_passes() {
        assert!(valid_vehicle().validate().is_ok());
    }

    #[test_case(1885, false; "before first car")]
    #[test_case(1886, true; "first car year")]
    #[test_case(2100, true; "upper bound")]
    #[test_case(2101, false; "past upper bound")]
    fn test_year_range(year: i32, ok: bool) {
        let mut v = valid_vehicle();
        v.year = year;
        assert_eq!(v.validate().is_ok(), ok);
    }

    #[test]
    fn test_negative_odometer_rejected() {
        let mut v = valid_vehicle();
        v.odometer = -1;
        assert!(v.validate().is_err());
    }

    #[test_case(0.0; "zero price")]
    #[test_case(-100.0; "negative price")]
    fn test_non_positive_price_rejected(price: f64) {
        let mut v = valid_vehicle();
        v.market_price = price;
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_fuel_type_parse_case_insensitive() {
        assert_eq!(FuelType::parse("GAS"), Some(FuelType::Gas));
        assert_eq!(FuelType::parse("gas"), Some(FuelType::Gas));
        assert_eq!(FuelType::parse("Hybrid"), Some(FuelType::Hybrid));
        assert_eq!(FuelType::parse("PLUTONIUM"), None);
    }

    #[test]
    fn test_transmission_parse() {
        assert_eq!(Transmission::parse("manual"), Some(Transmission::Manual));
        assert_eq!(Transmission::parse("AUTOMATIC"), Some(Transmission::Automatic));
        assert_eq!(Transmission::parse("CVT"), None);
    }

    #[test]
    fn test_status_parse_accepts_legacy_casing() {
        // Older tooling wrote "Available"/"Sold"; both casings must parse.
        assert_eq!(VehicleStatus::parse("Available"), Some(VehicleStatus::Available));
        assert_eq!(VehicleStatus::parse("AVAILABLE"), Some(VehicleStatus::Available));
        assert_eq!(VehicleStatus::parse("Sold"), Some(VehicleStatus::Sold));
        assert_eq!(VehicleStatus::parse("scrapped"), None);
    }

    #[test]
    fn test_status_serializes_canonical_uppercase() {
        let json = serde_json::to_string(&VehicleStatus::Available).unwrap();
        assert_eq!(json, "\"AVAILABLE\"");
    }

    #[test]
    fn test_enum_roundtrip() {
        for fuel in [FuelType::Gas, FuelType::Diesel, FuelType::Electric, FuelType::Hybrid] {
            assert_eq!(FuelType::parse(fuel.as_str()), Some(fuel));
        }
        for status in [VehicleStatus::Available, VehicleStatus::Sold] {
            assert_eq!(VehicleStatus::parse(status.as_str()), Some(status));
        }
    }
}
