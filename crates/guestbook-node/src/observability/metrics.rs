//! Prometheus metrics collection.
//!
//! Provides metrics for:
//! - HTTP request latency and counts
//! - Guestbook activity (entries created and deleted, rejected input)

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;
use std::sync::Arc;

/// HTTP request labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Matched route, or `unmatched`
    pub path: String,
    /// Response status code
    pub status: u16,
}

/// Global metrics state.
pub static METRICS: Lazy<MetricsState> = Lazy::new(MetricsState::new);

/// Metrics state container.
#[derive(Clone)]
pub struct MetricsState {
    /// Prometheus registry.
    pub registry: Arc<RwLock<Registry>>,
    /// HTTP request counter.
    pub http_requests_total: Family<HttpLabels, Counter>,
    /// HTTP request duration histogram (seconds).
    pub http_request_duration_seconds: Family<HttpLabels, Histogram>,
    /// Requests currently being served.
    pub http_active_requests: Gauge,
    /// Entries created since start.
    pub entries_created: Counter,
    /// Entries deleted since start.
    pub entries_deleted: Counter,
    /// Create requests rejected by validation.
    pub validation_failures: Counter,
}

impl Default for MetricsState {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsState {
    /// Create a new metrics state with all metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_requests_total = Family::<HttpLabels, Counter>::default();
        registry.register(
            "guestbook_http_requests",
            "Total HTTP requests",
            http_requests_total.clone(),
        );

        let http_request_duration_seconds =
            Family::<HttpLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.001, 2.0, 16))
            });
        registry.register(
            "guestbook_http_request_duration_seconds",
            "HTTP request duration in seconds",
            http_request_duration_seconds.clone(),
        );

        let http_active_requests = Gauge::default();
        registry.register(
            "guestbook_http_active_requests",
            "Number of HTTP requests in flight",
            http_active_requests.clone(),
        );

        let entries_created = Counter::default();
        registry.register(
            "guestbook_entries_created",
            "Guestbook entries created",
            entries_created.clone(),
        );

        let entries_deleted = Counter::default();
        registry.register(
            "guestbook_entries_deleted",
            "Guestbook entries deleted",
            entries_deleted.clone(),
        );

        let validation_failures = Counter::default();
        registry.register(
            "guestbook_validation_failures",
            "Create requests rejected by validation",
            validation_failures.clone(),
        );

        Self {
            registry: Arc::new(RwLock::new(registry)),
            http_requests_total,
            http_request_duration_seconds,
            http_active_requests,
            entries_created,
            entries_deleted,
            validation_failures,
        }
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let labels = HttpLabels {
            method: method.to_string(),
            path: path.to_string(),
            status,
        };

        self.http_requests_total.get_or_create(&labels).inc();
        self.http_request_duration_seconds
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Encode metrics for Prometheus scraping.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        let registry = self.registry.read();
        prometheus_client::encoding::text::encode(&mut buffer, &registry)?;
        Ok(buffer)
    }
}
