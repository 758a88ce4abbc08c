//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! dealership. All entities map directly to their corresponding database
//! tables.
//!
//! ## Entities
//!
//! - **Customer**: A dealership customer with contact and licence data
//! - **Vehicle**: An inventory vehicle with its value enums
//! - **Sale**: A completed sales transaction linking vehicle and customer
//! - **Image**: Stored image metadata for a vehicle
//! - **TestDrive**: A scheduled test-drive booking

mod customer;
mod image;
mod sale;
mod test_drive;
mod vehicle;

pub use customer::{Customer, CustomerPatch, NewCustomer};

pub use vehicle::{
    FuelType, NewVehicle, Transmission, Vehicle, VehicleStatus, MAX_YEAR, MIN_YEAR,
};

pub use sale::{
    validate_sale_price, NewSale, Sale, SaleInvoice, SalePatch, SaleReportEntry, SaleSummary,
    MAX_SALE_PRICE,
};

pub use image::Image;

pub use test_drive::{NewTestDrive, TestDrive, TestDriveDetail, TestDrivePatch};
