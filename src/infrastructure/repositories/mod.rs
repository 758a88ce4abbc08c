//! Repository Functions
//!
//! PostgreSQL data access, one module per entity.
//!
//! Repositories are stateless async functions with a common shape:
//! `operation(&mut PgConnection, typed args...) -> Result<T, AppError>`.
//! The connection is borrowed from a pooled handle by the calling handler;
//! each function runs exactly one transaction and never commits on a
//! failure path.
//!
//! ## Available Repositories
//!
//! - **customer_repository** - Customer CRUD and partial update
//! - **vehicle_repository** - Inventory CRUD
//! - **sale_repository** - Sales, invoice, and report queries
//! - **image_repository** - Vehicle image metadata
//! - **test_drive_repository** - Test-drive bookings

pub mod customer_repository;
pub mod image_repository;
pub mod sale_repository;
pub mod test_drive_repository;
pub mod vehicle_repository;
