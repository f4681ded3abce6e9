//! HTTP server for the status API
//!
//! Serves the status routes plus the operational endpoints:
//! - `/healthz` - Liveness probe (process is running)
//! - `/metrics` - Prometheus metrics

mod api;
mod metrics;

pub use api::{router, run_server, ApiError, ApiState};
pub use metrics::{create_metrics, SharedMetrics, StatusMetrics};

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_tests;
