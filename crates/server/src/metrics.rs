//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the premiere server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Calendar board size (collected dynamically)
//! - Core catalog, cache and retrieval metrics (registered from core)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "premiere_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .expect("http duration histogram is valid")
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("premiere_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("http request counter is valid")
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "premiere_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .expect("in-flight gauge is valid")
});

// =============================================================================
// Board Metrics (collected dynamically)
// =============================================================================

/// Movies accumulated on the calendar board.
pub static BOARD_MOVIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "premiere_board_movies",
        "Number of distinct movies on the calendar board",
    )
    .expect("board gauge is valid")
});

/// Months merged into the calendar board.
pub static BOARD_MONTHS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "premiere_board_months",
        "Number of months merged into the calendar board",
    )
    .expect("board month gauge is valid")
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let mut collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // HTTP
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        // Board
        Box::new(BOARD_MOVIES.clone()),
        Box::new(BOARD_MONTHS.clone()),
    ];

    // Core metrics (catalog, cache, retrieval)
    collectors.extend(premiere_core::metrics::all_metrics());

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            warn!(error = %e, "Failed to register metric");
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so gauges reflect the board as it is now.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let board = state.board().lock().await;
    BOARD_MOVIES.set(board.len() as i64);
    BOARD_MONTHS.set(board.month_count() as i64);
}

/// Normalize a path for metric labels (replace numeric IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
