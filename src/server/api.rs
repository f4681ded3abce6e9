//! HTTP routes for the status API
//!
//! - `/` and the five status routes return JSON envelopes
//! - `/healthz` - Liveness: Is the process alive? (never shells out)
//! - `/metrics` - Prometheus text exposition

use super::metrics::SharedMetrics;
use crate::status::types::{
    ErrorEnvelope, HealthStatus, MonitoringStatus, PlatformInfo, RegistryStatus, SecurityStatus,
    ServiceListing,
};
use crate::status::{StatusError, StatusQueryService};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

/// State shared by every handler
pub struct ApiState {
    pub service: StatusQueryService,
    pub metrics: SharedMetrics,
}

impl ApiState {
    pub fn new(service: StatusQueryService, metrics: SharedMetrics) -> Arc<Self> {
        Arc::new(Self { service, metrics })
    }
}

/// Error body variant: `/health` reports `status`, the listings report `error`
#[derive(Debug, Clone, Copy)]
enum ErrorShape {
    Status,
    Error,
}

/// A failed live query, rendered as a 500 with an error envelope
#[derive(Debug)]
pub struct ApiError {
    shape: ErrorShape,
    error: StatusError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.error.to_string();
        let envelope = match self.shape {
            ErrorShape::Status => ErrorEnvelope::status_error(message),
            ErrorShape::Error => ErrorEnvelope::error(message),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
    }
}

/// Record the outcome of a live query and wrap it for the response
fn finish<T>(
    state: &ApiState,
    query: &'static str,
    started: Instant,
    shape: ErrorShape,
    result: Result<T, StatusError>,
) -> Result<Json<T>, ApiError> {
    let elapsed = started.elapsed().as_secs_f64();
    match result {
        Ok(body) => {
            state.metrics.record_query_success(query, elapsed);
            Ok(Json(body))
        }
        Err(e) => {
            error!(query = query, error = %e, "Status query failed");
            state.metrics.record_query_error(query, elapsed);
            Err(ApiError { shape, error: e })
        }
    }
}

async fn platform_info(State(state): State<Arc<ApiState>>) -> Json<PlatformInfo> {
    state.metrics.record_static_query("platform_info");
    Json(state.service.platform_info())
}

async fn health(State(state): State<Arc<ApiState>>) -> Result<Json<HealthStatus>, ApiError> {
    let started = Instant::now();
    let result = state.service.health().await;
    finish(&state, "health", started, ErrorShape::Status, result)
}

async fn services(State(state): State<Arc<ApiState>>) -> Result<Json<ServiceListing>, ApiError> {
    let started = Instant::now();
    let result = state.service.list_services().await;
    finish(&state, "services", started, ErrorShape::Error, result)
}

async fn registry(State(state): State<Arc<ApiState>>) -> Result<Json<RegistryStatus>, ApiError> {
    let started = Instant::now();
    let result = state.service.registry_status().await;
    if let Ok(status) = &result {
        state.metrics.record_skipped_records(status.skipped_records);
    }
    finish(&state, "registry", started, ErrorShape::Error, result)
}

async fn monitoring(State(state): State<Arc<ApiState>>) -> Json<MonitoringStatus> {
    state.metrics.record_static_query("monitoring");
    Json(state.service.monitoring_status())
}

async fn security(State(state): State<Arc<ApiState>>) -> Json<SecurityStatus> {
    state.metrics.record_static_query("security");
    Json(state.service.security_status())
}

/// Liveness probe handler
///
/// Always returns 200 OK - if this responds, the process is alive.
async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<Arc<ApiState>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Build the router with every status route
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(platform_info))
        .route("/health", get(health))
        .route("/services", get(services))
        .route("/registry", get(registry))
        .route("/monitoring", get(monitoring))
        .route("/security", get(security))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Run the status API on the specified port
///
/// Binds `0.0.0.0:<port>` and runs forever until the server is shut down.
pub async fn run_server(port: u16, state: Arc<ApiState>) -> Result<(), std::io::Error> {
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Status API listening");

    axum::serve(listener, app)
        .await
        .map_err(std::io::Error::other)
}
