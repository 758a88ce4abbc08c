//! Common Test Utilities
//!
//! Shared helpers and test infrastructure.
//!
//! The test application is wired with an empty connection pool and a short
//! acquire deadline: every handler path that validates before touching the
//! database can be driven end-to-end, and any path that does reach for a
//! connection fails fast with 503 instead of hanging the test.

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use tower::ServiceExt;

use dealerdrive::config::{
    CorsSettings, DatabaseSettings, ServerSettings, Settings, UploadSettings,
};
use dealerdrive::infrastructure::database::ConnectionPool;
use dealerdrive::infrastructure::storage::ImageStore;
use dealerdrive::presentation::http::routes;
use dealerdrive::startup::AppState;

/// Test application builder
pub struct TestApp {
    pub router: Router,
    upload_dir: std::path::PathBuf,
}

impl TestApp {
    /// Create a new test application with no live database behind the pool
    pub fn new() -> Self {
        let upload_dir =
            std::env::temp_dir().join(format!("dealerdrive-tests-{}", uuid::Uuid::new_v4()));

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseSettings {
                url: "postgres://unused".into(),
                pool_size: 0,
                acquire_timeout: Some(1),
            },
            uploads: UploadSettings {
                dir: upload_dir.to_string_lossy().into_owned(),
            },
            cors: CorsSettings {
                allowed_origins: Vec::new(),
            },
            environment: "test".into(),
        };

        let db = ConnectionPool::<sqlx::PgConnection>::new(
            Vec::new(),
            Some(Duration::from_millis(100)),
        );
        let images = ImageStore::new(&upload_dir).expect("temp upload dir");

        let state = AppState {
            db,
            images,
            settings: Arc::new(settings),
        };

        Self {
            router: routes::create_router(state),
            upload_dir,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.request_json("POST", uri, body).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json(&self, uri: &str, body: &str) -> Response {
        self.request_json("PATCH", uri, body).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: &str) -> Response {
        self.request_json("PUT", uri, body).await
    }

    async fn request_json(&self, method: &str, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.upload_dir).ok();
    }
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
