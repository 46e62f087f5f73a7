//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Party requests (how each one ended)
//! - Beer matching (candidates per request)
//! - External services (token issuer, playlist search)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Party Metrics
// =============================================================================

/// Party requests total by outcome.
pub static PARTY_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("beerparty_party_outcomes_total", "Party requests by outcome"),
        &["outcome"], // "matched", "no_beer", "no_playlist", "store_error", "playlist_error"
    )
    .unwrap()
});

/// Beers whose range contained the requested temperature.
pub static CANDIDATES_FOUND: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "beerparty_candidates_found",
            "Number of beer candidates per party request",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0]),
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "beerparty_upstream_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "beerparty_upstream_requests_total",
            "Total external service requests",
        ),
        &["operation", "status"], // status: "success", "error", "timeout"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PARTY_OUTCOMES.clone()),
        Box::new(CANDIDATES_FOUND.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
    ]
}
