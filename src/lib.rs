//! # DealerDrive Library
//!
//! This crate provides a dealership management backend with:
//! - RESTful HTTP API endpoints for customers, inventory, sales, images
//!   and test drives
//! - PostgreSQL for persistent storage behind a bounded connection pool
//! - CSV exports for sales reporting
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and validation rules
//! - **Application Layer**: Request/response DTOs
//! - **Infrastructure Layer**: Connection pool, repositories, file storage
//! - **Presentation Layer**: HTTP handlers and routes
//!
//! ## Module Structure
//!
//! ```text
//! dealerdrive/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and validation
//! +-- application/    Request/response DTOs
//! +-- infrastructure/ Pool, repositories and storage
//! +-- presentation/   HTTP routes and handlers
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - DTOs
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
