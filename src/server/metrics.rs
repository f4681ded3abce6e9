//! Prometheus metrics for the status API
//!
//! Exposes request activity for the status queries:
//! - Query counts by outcome
//! - Query durations (dominated by the external command)
//! - Registry records dropped by the partial-success parser

use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Status API metrics registry
///
/// Thread-safe container for all Prometheus metrics.
#[derive(Clone)]
pub struct StatusMetrics {
    registry: Registry,
    /// Total queries by name and result (success, error)
    pub queries_total: IntCounterVec,
    /// Query duration in seconds
    pub query_duration_seconds: HistogramVec,
    /// Image lines that could not be parsed
    pub registry_records_skipped_total: IntCounter,
}

impl StatusMetrics {
    /// Create a new metrics registry with all status API metrics
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let queries_total = IntCounterVec::new(
            Opts::new("infraforge_queries_total", "Total number of status queries"),
            &["query", "result"],
        )?;
        registry.register(Box::new(queries_total.clone()))?;

        let query_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "infraforge_query_duration_seconds",
                "Duration of status queries in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["query"],
        )?;
        registry.register(Box::new(query_duration_seconds.clone()))?;

        let registry_records_skipped_total = IntCounter::with_opts(Opts::new(
            "infraforge_registry_records_skipped_total",
            "Malformed image records skipped in registry listings",
        ))?;
        registry.register(Box::new(registry_records_skipped_total.clone()))?;

        Ok(Self {
            registry,
            queries_total,
            query_duration_seconds,
            registry_records_skipped_total,
        })
    }

    pub fn record_query_success(&self, query: &str, duration_secs: f64) {
        self.queries_total
            .with_label_values(&[query, "success"])
            .inc();
        self.query_duration_seconds
            .with_label_values(&[query])
            .observe(duration_secs);
    }

    /// Count a query that never leaves the process; no duration is observed
    pub fn record_static_query(&self, query: &str) {
        self.queries_total
            .with_label_values(&[query, "success"])
            .inc();
    }

    pub fn record_query_error(&self, query: &str, duration_secs: f64) {
        self.queries_total.with_label_values(&[query, "error"]).inc();
        self.query_duration_seconds
            .with_label_values(&[query])
            .observe(duration_secs);
    }

    pub fn record_skipped_records(&self, count: usize) {
        self.registry_records_skipped_total.inc_by(count as u64);
    }

    /// Encode all metrics to Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Failed to encode metrics as UTF-8: {}", e))
        })
    }
}

/// Shared metrics handle for use across handlers
pub type SharedMetrics = Arc<StatusMetrics>;

pub fn create_metrics() -> Result<SharedMetrics, prometheus::Error> {
    Ok(Arc::new(StatusMetrics::new()?))
}
