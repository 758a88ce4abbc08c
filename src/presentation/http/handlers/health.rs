//! Health Check Handlers
//!
//! Provides health check endpoints for liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/ready` - Readiness probe (is the database reachable?)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::startup::AppState;

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response with pool occupancy
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pool: PoolHealth,
}

/// Connection pool occupancy snapshot
#[derive(Debug, Serialize)]
pub struct PoolHealth {
    pub size: usize,
    pub available: usize,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe - checks the database can service a query
/// Returns 200 if ready, 503 if the backend is unreachable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let pool = PoolHealth {
        size: state.db.size(),
        available: state.db.available(),
    };

    let db_ok = match state.db.acquire().await {
        Ok(mut conn) => sqlx::query("SELECT 1").execute(&mut *conn).await.is_ok(),
        Err(_) => false,
    };

    let (status_code, status) = if db_ok {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            pool,
        }),
    )
}
