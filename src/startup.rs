//! Application Startup
//!
//! Application building and server initialization. The connection pool is
//! constructed exactly once here and handed to every handler through
//! [`AppState`]: one pool per process, no globals.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::infrastructure::database::{self, DbPool};
use crate::infrastructure::storage::ImageStore;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub images: ImageStore,
    pub settings: Arc<Settings>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create the database pool; failure here is fatal by design.
        let db = database::create_pool(&settings.database).await?;
        tracing::info!(
            size = db.size(),
            "Database connection pool created"
        );

        // Bring the schema up to date on one pool connection.
        {
            let mut conn = db.acquire().await?;
            database::run_migrations(&mut conn).await?;
        }
        tracing::info!("Database migrations applied");

        // Uploaded image storage
        let images = ImageStore::new(&settings.uploads.dir)?;
        tracing::info!(dir = %images.root().display(), "Upload storage ready");

        // Create app state
        let state = AppState {
            db,
            images,
            settings: Arc::new(settings.clone()),
        };

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr: SocketAddr = settings.server_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
