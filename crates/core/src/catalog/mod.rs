//! Movie catalog integration.
//!
//! The catalog is queried through [`CatalogApi`], which returns the upstream
//! JSON body untouched. Callers that need typed data run it through
//! [`decode`]; the proxy endpoint forwards it as-is.

pub mod images;
mod tmdb;
mod types;

pub use tmdb::{query_params, TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::calendar::MonthWindow;
use crate::locale::{Language, Region};

/// Errors that can occur when talking to the movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a status was received.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Catalog answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),

    /// No API key is configured.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    /// HTTP status to mirror back to API callers.
    pub fn status(&self) -> u16 {
        match self {
            CatalogError::HttpError(e) => e.status().map(|s| s.as_u16()).unwrap_or(502),
            CatalogError::NotFound(_) => 404,
            CatalogError::ApiError { status, .. } => *status,
            CatalogError::MalformedResponse(_) => 502,
            CatalogError::NotConfigured(_) => 500,
        }
    }
}

/// A single catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogRequest {
    /// One page of movies released inside a month, most popular first.
    Discover {
        window: MonthWindow,
        language: Language,
        region: Region,
        page: u32,
    },
    Details {
        movie_id: u64,
        language: Language,
    },
    Videos {
        movie_id: u64,
        language: Language,
    },
    ReleaseDates {
        movie_id: u64,
    },
    Search {
        query: String,
        language: Language,
    },
}

impl CatalogRequest {
    /// Short endpoint label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogRequest::Discover { .. } => "discover",
            CatalogRequest::Details { .. } => "details",
            CatalogRequest::Videos { .. } => "videos",
            CatalogRequest::ReleaseDates { .. } => "release_dates",
            CatalogRequest::Search { .. } => "search",
        }
    }

    /// Path relative to the catalog base URL.
    pub fn path(&self) -> String {
        match self {
            CatalogRequest::Discover { .. } => "/discover/movie".to_string(),
            CatalogRequest::Details { movie_id, .. } => format!("/movie/{}", movie_id),
            CatalogRequest::Videos { movie_id, .. } => format!("/movie/{}/videos", movie_id),
            CatalogRequest::ReleaseDates { movie_id } => {
                format!("/movie/{}/release_dates", movie_id)
            }
            CatalogRequest::Search { .. } => "/search/movie".to_string(),
        }
    }
}

/// Trait for movie catalog clients.
///
/// Implemented by [`TmdbClient`] and by the test mock.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Whether credentials are present. An unconfigured client fails every
    /// request with [`CatalogError::NotConfigured`].
    fn is_configured(&self) -> bool;

    /// Perform `request` and return the response body.
    async fn fetch(&self, request: &CatalogRequest) -> Result<serde_json::Value, CatalogError>;
}

/// Decode a raw catalog body into `T`.
pub fn decode<T: DeserializeOwned>(
    request: &CatalogRequest,
    body: serde_json::Value,
) -> Result<T, CatalogError> {
    serde_json::from_value(body).map_err(|e| {
        CatalogError::MalformedResponse(format!(
            "Failed to parse {} response: {}",
            request.kind(),
            e
        ))
    })
}

/// Fetch and decode in one step.
pub async fn fetch_typed<T: DeserializeOwned>(
    api: &dyn CatalogApi,
    request: &CatalogRequest,
) -> Result<T, CatalogError> {
    let body = api.fetch(request).await?;
    decode(request, body)
}
