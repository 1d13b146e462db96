//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access. A client built without one stays
//! usable but reports itself unconfigured and fails every request.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CatalogApi, CatalogError, CatalogRequest};
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key. May be left empty, in which case every request fails
    /// with a not-configured error.
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters/backdrops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            image_base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if config.api_key.is_empty() {
            warn!("TMDB API key not set, catalog requests will fail");
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn send(&self, request: &CatalogRequest) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}{}", self.base_url, request.path());

        debug!(endpoint = request.kind(), %url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&query_params(request))
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            return Err(CatalogError::NotFound(request.path()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            CatalogError::MalformedResponse(format!(
                "Failed to parse {} response: {}",
                request.kind(),
                e
            ))
        })
    }
}

#[async_trait::async_trait]
impl CatalogApi for TmdbClient {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn fetch(&self, request: &CatalogRequest) -> Result<serde_json::Value, CatalogError> {
        if !self.is_configured() {
            return Err(CatalogError::NotConfigured(
                "API key not configured".to_string(),
            ));
        }

        let started = Instant::now();
        let result = self.send(request).await;

        CATALOG_REQUEST_DURATION
            .with_label_values(&[request.kind()])
            .observe(started.elapsed().as_secs_f64());
        let outcome = if result.is_ok() { "success" } else { "error" };
        CATALOG_REQUESTS
            .with_label_values(&[request.kind(), outcome])
            .inc();

        result
    }
}

/// Query parameters for `request`, excluding the API key.
///
/// Worldwide discovery filters on the primary release date. A specific
/// region filters on that region's theatrical release dates instead.
pub fn query_params(request: &CatalogRequest) -> Vec<(&'static str, String)> {
    match request {
        CatalogRequest::Discover {
            window,
            language,
            region,
            page,
        } => {
            let mut params = vec![("language", language.api_code().to_string())];
            if region.is_all() {
                params.extend([
                    ("sort_by", "popularity.desc".to_string()),
                    ("primary_release_date.gte", window.start_param()),
                    ("primary_release_date.lte", window.end_param()),
                ]);
            } else {
                params.extend([
                    ("region", region.code().to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("release_date.gte", window.start_param()),
                    ("release_date.lte", window.end_param()),
                    ("with_release_type", "2|3".to_string()),
                ]);
            }
            params.push(("page", page.to_string()));
            params
        }
        CatalogRequest::Details { language, .. } | CatalogRequest::Videos { language, .. } => {
            vec![("language", language.api_code().to_string())]
        }
        CatalogRequest::ReleaseDates { .. } => Vec::new(),
        CatalogRequest::Search { query, language } => vec![
            ("language", language.api_code().to_string()),
            ("query", query.clone()),
            ("page", "1".to_string()),
        ],
    }
}
