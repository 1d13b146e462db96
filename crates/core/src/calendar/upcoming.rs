//! Month retrieval: hides catalog pagination behind a single cached call.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::MonthWindow;
use crate::cache::TtlCache;
use crate::catalog::{fetch_typed, CatalogApi, CatalogError, CatalogItem, CatalogRequest, DiscoverPage};
use crate::locale::{Language, Region};
use crate::metrics::PAGES_SKIPPED;

/// Upper bound on pages fetched for one month.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// What to do when one of pages 2..N fails.
///
/// A failure on page 1 always fails the month, since its page count drives
/// the rest of the fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFailurePolicy {
    /// The failed page contributes no items.
    #[default]
    BestEffort,
    /// The whole month fails.
    Strict,
}

/// Cache key for a month listing.
pub fn month_cache_key(window: &MonthWindow, language: Language, region: Region) -> String {
    format!(
        "upcoming-{}-{}-{}-{}",
        window.year(),
        window.month(),
        language.code(),
        region.code()
    )
}

/// Retrieves every release in a month across catalog pages.
pub struct UpcomingReleases {
    catalog: Arc<dyn CatalogApi>,
    cache: TtlCache<Arc<Vec<CatalogItem>>>,
    max_pages: u32,
    page_failure: PageFailurePolicy,
}

impl UpcomingReleases {
    pub fn new(catalog: Arc<dyn CatalogApi>, ttl: Duration) -> Self {
        Self {
            catalog,
            cache: TtlCache::new(ttl),
            max_pages: DEFAULT_MAX_PAGES,
            page_failure: PageFailurePolicy::default(),
        }
    }

    /// Override the page cap (at least 1).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_page_failure(mut self, policy: PageFailurePolicy) -> Self {
        self.page_failure = policy;
        self
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn page_failure(&self) -> PageFailurePolicy {
        self.page_failure
    }

    /// All releases in `window`, page-ascending.
    ///
    /// Served from cache when a fresh entry exists for the same month,
    /// language and region.
    pub async fn month(
        &self,
        window: MonthWindow,
        language: Language,
        region: Region,
    ) -> Result<Arc<Vec<CatalogItem>>, CatalogError> {
        let key = month_cache_key(&window, language, region);
        self.cache
            .get_or_fetch(&key, || self.assemble(window, language, region))
            .await
    }

    /// Drop every cached month.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn assemble(
        &self,
        window: MonthWindow,
        language: Language,
        region: Region,
    ) -> Result<Arc<Vec<CatalogItem>>, CatalogError> {
        let first = self
            .fetch_page(window, language, region, 1)
            .await
            .inspect_err(|e| {
                warn!(
                    year = window.year(),
                    month = window.month(),
                    error = %e,
                    "Failed to fetch first discover page"
                )
            })?;

        let total_pages = first.total_pages.min(self.max_pages);
        let mut items = first.results;

        if total_pages > 1 {
            let pages: Vec<u32> = (2..=total_pages).collect();
            let responses = join_all(
                pages
                    .iter()
                    .map(|&page| self.fetch_page(window, language, region, page)),
            )
            .await;

            // join_all yields results in input order, so pages stay ascending.
            for (page, response) in pages.into_iter().zip(responses) {
                match response {
                    Ok(data) => items.extend(data.results),
                    Err(e) if self.page_failure == PageFailurePolicy::Strict => return Err(e),
                    Err(e) => {
                        warn!(page, error = %e, "Skipping failed discover page");
                        PAGES_SKIPPED.inc();
                    }
                }
            }
        }

        info!(
            year = window.year(),
            month = window.month(),
            language = %language,
            region = %region,
            pages = total_pages.max(1),
            movies = items.len(),
            "Fetched month releases"
        );

        Ok(Arc::new(items))
    }

    async fn fetch_page(
        &self,
        window: MonthWindow,
        language: Language,
        region: Region,
        page: u32,
    ) -> Result<DiscoverPage, CatalogError> {
        debug!(page, "Fetching discover page");
        let request = CatalogRequest::Discover {
            window,
            language,
            region,
            page,
        };
        fetch_typed(self.catalog.as_ref(), &request).await
    }
}
