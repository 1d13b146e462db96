//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogApi, CatalogError, CatalogRequest};

/// Mock implementation of the CatalogApi trait.
///
/// Provides controllable behavior for testing:
/// - Serve canned JSON bodies per request
/// - Fail specific requests with a status code
/// - Track requests for assertions
///
/// Requests with no canned body fail with `NotFound`.
///
/// # Example
///
/// ```rust,ignore
/// use premiere_core::testing::{fixtures, MockCatalog};
///
/// let catalog = MockCatalog::new();
/// catalog.set_response(request.clone(), fixtures::discover_page(1, 1, movies)).await;
///
/// let body = catalog.fetch(&request).await?;
/// assert_eq!(catalog.request_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockCatalog {
    /// Canned response bodies.
    responses: Arc<RwLock<HashMap<CatalogRequest, serde_json::Value>>>,
    /// Requests that fail with the given status.
    failures: Arc<RwLock<HashMap<CatalogRequest, u16>>>,
    /// Recorded requests, in call order.
    requests: Arc<RwLock<Vec<CatalogRequest>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    configured: AtomicBool,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new configured mock with no canned responses.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            configured: AtomicBool::new(true),
        }
    }

    /// A mock that behaves like a client without an API key.
    pub fn unconfigured() -> Self {
        let catalog = Self::new();
        catalog.configured.store(false, Ordering::SeqCst);
        catalog
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Serve `body` for `request`.
    pub async fn set_response(&self, request: CatalogRequest, body: serde_json::Value) {
        self.responses.write().await.insert(request, body);
    }

    /// Fail `request` with an API error carrying `status`.
    pub async fn fail_request(&self, request: CatalogRequest, status: u16) {
        self.failures.write().await.insert(request, status);
    }

    /// Remove all per-request failures.
    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Set an error to be returned by the next request.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// All requests made so far.
    pub async fn requests(&self) -> Vec<CatalogRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    async fn fetch(&self, request: &CatalogRequest) -> Result<serde_json::Value, CatalogError> {
        if !self.is_configured() {
            return Err(CatalogError::NotConfigured(
                "API key not configured".to_string(),
            ));
        }

        self.requests.write().await.push(request.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(&status) = self.failures.read().await.get(request) {
            return Err(CatalogError::ApiError {
                status,
                message: format!("mock failure for {}", request.kind()),
            });
        }

        self.responses
            .read()
            .await
            .get(request)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(request.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use serde_json::json;

    #[tokio::test]
    async fn test_serves_canned_response_and_records() {
        let catalog = MockCatalog::new();
        let request = CatalogRequest::ReleaseDates { movie_id: 1 };
        catalog
            .set_response(request.clone(), json!({"id": 1, "results": []}))
            .await;

        let body = catalog.fetch(&request).await.unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(catalog.requests().await, vec![request]);
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let catalog = MockCatalog::new();
        let err = catalog
            .fetch(&CatalogRequest::Details {
                movie_id: 9,
                language: Language::En,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_next_error_is_one_shot() {
        let catalog = MockCatalog::new();
        let request = CatalogRequest::ReleaseDates { movie_id: 1 };
        catalog.set_response(request.clone(), json!({})).await;
        catalog
            .set_next_error(CatalogError::MalformedResponse("boom".into()))
            .await;

        assert!(catalog.fetch(&request).await.is_err());
        assert!(catalog.fetch(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_records_nothing() {
        let catalog = MockCatalog::unconfigured();
        let err = catalog
            .fetch(&CatalogRequest::ReleaseDates { movie_id: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured(_)));
        assert_eq!(catalog.request_count().await, 0);
    }
}
