//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! backed by the mock catalog and a settings file in a temp directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use premiere_core::testing::MockCatalog;
use premiere_core::{CatalogApi, Config, PageFailurePolicy, SettingsStore};
use premiere_server::state::AppState;

/// Re-export fixtures for test convenience
pub use premiere_core::testing::fixtures;

/// Test fixture for E2E testing with a mock catalog.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_month() {
///     let fixture = TestFixture::new().await;
///     fixture.catalog.set_response(request, fixtures::discover_page(1, 1, movies)).await;
///
///     let response = fixture.get("/api/v1/calendar/2024/5").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure canned responses and failures
    pub catalog: Arc<MockCatalog>,
    /// Shared state, for inspecting the board directly
    pub state: Arc<AppState>,
    /// Temporary directory holding the settings file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Load settings before serving (as the binary does at startup)
    pub hydrate_settings: bool,
    /// Whether the catalog has an API key
    pub catalog_configured: bool,
    pub page_failure: PageFailurePolicy,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            hydrate_settings: true,
            catalog_configured: true,
            page_failure: PageFailurePolicy::BestEffort,
        }
    }
}

impl TestConfig {
    /// Settings never loaded.
    pub fn unhydrated() -> Self {
        Self {
            hydrate_settings: false,
            ..Self::default()
        }
    }

    /// Catalog without an API key.
    pub fn unconfigured() -> Self {
        Self {
            catalog_configured: false,
            ..Self::default()
        }
    }

    pub fn strict() -> Self {
        Self {
            page_failure: PageFailurePolicy::Strict,
            ..Self::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let settings_path = temp_dir.path().join("movie-calendar-settings.json");

        let catalog = Arc::new(if test_config.catalog_configured {
            MockCatalog::new()
        } else {
            MockCatalog::unconfigured()
        });

        let mut config = Config::default();
        config.settings.path = settings_path.clone();
        config.calendar.page_failure = test_config.page_failure;

        let state = Arc::new(AppState::with_settings(
            config,
            Arc::clone(&catalog) as Arc<dyn CatalogApi>,
            SettingsStore::new(settings_path),
        ));

        if test_config.hydrate_settings {
            state
                .hydrate_settings()
                .await
                .expect("Failed to hydrate settings");
        }

        let router = premiere_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            catalog,
            state,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
