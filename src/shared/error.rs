//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Database unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
///
/// Every failure surfaces as `{"error": ...}` with an optional
/// `"message"` detail field.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AppError {
    /// Translate database constraint violations into domain failures.
    ///
    /// Unique violations become `DuplicateKey`; foreign-key violations
    /// become `NotFound` naming the referenced entity (derived from the
    /// constraint name). Anything else passes through as `Database`.
    pub fn from_db(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return AppError::DuplicateKey("Duplicate key value".into());
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                let entity = if constraint.contains("vehicle") {
                    "Vehicle"
                } else if constraint.contains("customer") {
                    "Customer"
                } else {
                    "Referenced record"
                };
                return AppError::NotFound(format!("{entity} not found"));
            }
        }
        AppError::Database(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::DuplicateKey(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::PoolExhausted => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Connection pool exhausted".into(),
                Some("Try again later".into()),
            ),
            AppError::BackendUnavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable".into(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, message };

        (status, Json(body)).into_response()
    }
}
