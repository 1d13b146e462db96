//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog traffic (requests per endpoint and outcome)
//! - The in-memory response cache (hits, misses, expirations)
//! - Month retrieval (failed pages, stale merges)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog requests total by endpoint and result.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "premiere_catalog_requests_total",
            "Total requests sent to the movie catalog",
        ),
        &["endpoint", "result"], // result: "success", "error"
    )
    .expect("catalog request counter is valid")
});

/// Catalog request duration.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "premiere_catalog_request_duration_seconds",
            "Duration of movie catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .expect("catalog duration histogram is valid")
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Cache lookups by result ("hit", "miss", "expired").
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("premiere_cache_lookups_total", "Response cache lookups"),
        &["result"],
    )
    .expect("cache lookup counter is valid")
});

// =============================================================================
// Retrieval Metrics
// =============================================================================

/// Discover pages that failed and were skipped in best-effort mode.
pub static PAGES_SKIPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "premiere_discover_pages_skipped_total",
        "Discover pages dropped after a failed request",
    )
    .expect("skipped page counter is valid")
});

/// Month results discarded because settings changed mid-flight.
pub static STALE_MERGES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "premiere_stale_merges_total",
        "Month results discarded because language or region changed",
    )
    .expect("stale merge counter is valid")
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(PAGES_SKIPPED.clone()),
        Box::new(STALE_MERGES.clone()),
    ]
}
