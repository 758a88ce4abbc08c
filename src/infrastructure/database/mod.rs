//! Database Module
//!
//! PostgreSQL connection pool and transaction discipline.
//!
//! Repository functions take `&mut PgConnection` borrowed from a
//! [`PooledConnection`] and run exactly one transaction per call:
//! `conn.begin()` → statements → `tx.commit()`. A failure propagated with
//! `?` drops the transaction guard uncommitted, which rolls it back.

pub mod pool;

use std::time::Duration;

use sqlx::postgres::PgConnection;
use sqlx::Connection;

use crate::config::DatabaseSettings;
use crate::shared::error::AppError;

pub use pool::{ConnectionPool, PooledConnection};

/// Pool of live PostgreSQL sessions.
pub type DbPool = ConnectionPool<PgConnection>;

/// Request-scoped borrow of one PostgreSQL session.
pub type DbConnection = PooledConnection<PgConnection>;

/// Eagerly open the configured number of connections.
///
/// Any connection failure here is fatal: the process must not start with a
/// partially-populated pool.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, AppError> {
    let mut connections = Vec::with_capacity(settings.pool_size as usize);
    for _ in 0..settings.pool_size {
        let conn = PgConnection::connect(&settings.url)
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;
        connections.push(conn);
    }

    let acquire_timeout = settings.acquire_timeout.map(Duration::from_secs);
    Ok(ConnectionPool::new(connections, acquire_timeout))
}

/// Run database migrations on one pool connection.
pub async fn run_migrations(conn: &mut PgConnection) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(conn).await
}
