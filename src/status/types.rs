//! Response envelopes returned by the status queries
//!
//! Every envelope is built fresh per request and serialized as-is.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Endpoints advertised by the root route
pub const ENDPOINTS: [&str; 5] = ["/health", "/services", "/registry", "/monitoring", "/security"];

/// ISO-8601 UTC timestamp for the moment a response is built
pub fn response_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub message: String,
    pub owner: String,
    pub platform: String,
    pub version: String,
    pub trademark: String,
    pub domain: String,
    pub timestamp: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub platform: String,
    pub owner: String,
    pub services_count: usize,
    pub timestamp: String,
    pub uptime: String,
}

/// One cluster service, reduced to the fields the API exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    /// Port descriptors exactly as the cluster reported them
    pub ports: serde_json::Value,
    pub cluster_ip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListing {
    pub platform: String,
    pub owner: String,
    pub services: Vec<ServiceSummary>,
    pub total_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryImage {
    pub repository: String,
    pub tag: String,
    pub size: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStatus {
    pub platform: String,
    pub registry: String,
    pub images: Vec<RegistryImage>,
    pub total_images: usize,
    pub timestamp: String,
    /// Lines dropped because they were not valid image records
    #[serde(skip)]
    pub skipped_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringEndpoints {
    pub prometheus: String,
    pub grafana: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringStatus {
    pub platform: String,
    pub monitoring: MonitoringEndpoints,
    pub dashboards: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityPolicy {
    pub policy: String,
    pub reverse_proxy: String,
    pub ssl: String,
    pub scanning: String,
    pub compliance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityStatus {
    pub platform: String,
    pub security: SecurityPolicy,
    pub trademark: String,
    pub timestamp: String,
}

/// Body returned with a 500 when a live query fails
///
/// `/health` reports `status: "error"`, the listing routes report `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn status_error(message: impl Into<String>) -> Self {
        Self {
            status: Some("error".to_string()),
            error: None,
            message: message.into(),
            timestamp: response_timestamp(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: None,
            error: Some(message.clone()),
            message,
            timestamp: response_timestamp(),
        }
    }
}
