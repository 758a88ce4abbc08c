//! # Domain Layer
//!
//! The domain layer contains the core business rules of the dealership
//! backend. It is independent of any external frameworks or infrastructure
//! concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Customer, Vehicle, Sale, Image,
//!   TestDrive) together with their validation and patch-merge rules
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Validation runs before a database connection is ever taken

pub mod entities;

// Re-export commonly used types
pub use entities::*;
