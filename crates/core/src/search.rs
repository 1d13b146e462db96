//! Title search.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::TtlCache;
use crate::catalog::{fetch_typed, CatalogApi, CatalogError, CatalogItem, CatalogRequest, DiscoverPage};
use crate::locale::Language;

/// Maximum number of results returned for one query.
pub const MAX_SEARCH_RESULTS: usize = 10;

pub struct SearchService {
    catalog: Arc<dyn CatalogApi>,
    cache: TtlCache<Arc<Vec<CatalogItem>>>,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn CatalogApi>, ttl: Duration) -> Self {
        Self {
            catalog,
            cache: TtlCache::new(ttl),
        }
    }

    /// First page of matches for `query`, at most [`MAX_SEARCH_RESULTS`].
    ///
    /// A blank query returns nothing without contacting the catalog.
    pub async fn search(
        &self,
        query: &str,
        language: Language,
    ) -> Result<Arc<Vec<CatalogItem>>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Arc::new(Vec::new()));
        }

        let key = format!("search-{}-{}", query, language.code());
        self.cache
            .get_or_fetch(&key, || async {
                debug!(query, "Searching catalog");
                let request = CatalogRequest::Search {
                    query: query.to_string(),
                    language,
                };
                let page: DiscoverPage = fetch_typed(self.catalog.as_ref(), &request).await?;
                let mut results = page.results;
                results.truncate(MAX_SEARCH_RESULTS);
                Ok(Arc::new(results))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::testing::{fixtures, MockCatalog};

    #[tokio::test]
    async fn test_blank_query_skips_catalog() {
        let catalog = Arc::new(MockCatalog::new());
        let search = SearchService::new(catalog.clone(), DEFAULT_TTL);

        assert!(search.search("   ", Language::Ko).await.unwrap().is_empty());
        assert_eq!(catalog.request_count().await, 0);
    }

    #[tokio::test]
    async fn test_results_truncated() {
        let catalog = Arc::new(MockCatalog::new());
        let movies = (1..=20)
            .map(|id| fixtures::catalog_item(id, &format!("Dune {}", id), None))
            .collect();
        catalog
            .set_response(
                CatalogRequest::Search {
                    query: "dune".to_string(),
                    language: Language::En,
                },
                fixtures::discover_page(1, 1, movies),
            )
            .await;
        let search = SearchService::new(catalog.clone(), DEFAULT_TTL);

        let results = search.search("dune", Language::En).await.unwrap();
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results[0].id, 1);

        search.search("dune", Language::En).await.unwrap();
        assert_eq!(catalog.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let catalog = Arc::new(MockCatalog::new());
        let request = CatalogRequest::Search {
            query: "dune".to_string(),
            language: Language::Ko,
        };
        catalog.fail_request(request, 502).await;
        let search = SearchService::new(catalog, DEFAULT_TTL);

        let err = search.search("dune", Language::Ko).await.unwrap_err();
        assert_eq!(err.status(), 502);
    }
}
