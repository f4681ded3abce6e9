//! Status queries
//!
//! Each query is independent: the live ones run a single external command
//! through the [`CommandRunner`], parse its output and map a subset of fields
//! into a response envelope. Nothing is cached between calls.
//!
//! The two listing queries fail differently on bad data:
//! - `list_services` parses one document and fails the whole request
//! - `registry_status` parses line by line and drops only the bad lines

pub mod parse;
pub mod types;

use crate::config::PlatformConfig;
use crate::runner::{CommandRunner, RunnerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use types::{
    response_timestamp, HealthStatus, MonitoringEndpoints, MonitoringStatus, PlatformInfo,
    RegistryStatus, SecurityPolicy, SecurityStatus, ServiceListing, ENDPOINTS,
};

#[derive(Debug, Error)]
pub enum StatusError {
    /// The command could not run or exited unsuccessfully
    #[error("{0}")]
    Invocation(String),

    /// The command ran but its output did not match the expected schema
    #[error("failed to parse {program} output: {source}")]
    Parse {
        program: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<RunnerError> for StatusError {
    fn from(err: RunnerError) -> Self {
        StatusError::Invocation(err.to_string())
    }
}

/// Binaries used for the live queries
#[derive(Debug, Clone)]
pub struct Tools {
    pub kubectl: String,
    pub docker: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            docker: "docker".to_string(),
        }
    }
}

/// Answers the status queries exposed by the API
#[derive(Clone)]
pub struct StatusQueryService {
    platform: Arc<PlatformConfig>,
    runner: Arc<dyn CommandRunner>,
    tools: Tools,
}

impl StatusQueryService {
    pub fn new(platform: Arc<PlatformConfig>, runner: Arc<dyn CommandRunner>, tools: Tools) -> Self {
        Self {
            platform,
            runner,
            tools,
        }
    }

    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    /// Run a command and return its stdout, treating a non-zero exit as failure
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, StatusError> {
        let output = self.runner.execute(program, args).await?;

        if !output.success() {
            let stderr = output.stderr.trim();
            warn!(
                program = program,
                exit_status = output.exit_status,
                stderr = stderr,
                "External command failed"
            );
            return Err(StatusError::Invocation(if stderr.is_empty() {
                format!("{} exited with status {}", program, output.exit_status)
            } else {
                format!(
                    "{} exited with status {}: {}",
                    program, output.exit_status, stderr
                )
            }));
        }

        Ok(output.stdout)
    }

    pub fn platform_info(&self) -> PlatformInfo {
        let p = &self.platform;
        PlatformInfo {
            message: format!("Welcome to {} API", p.platform),
            owner: p.owner.clone(),
            platform: p.platform.clone(),
            version: p.version.clone(),
            trademark: p.trademark.clone(),
            domain: p.domain.clone(),
            timestamp: response_timestamp(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Count the services the cluster reports
    pub async fn health(&self) -> Result<HealthStatus, StatusError> {
        let stdout = self
            .run(&self.tools.kubectl, &["get", "services", "--no-headers"])
            .await?;

        Ok(HealthStatus {
            status: "healthy".to_string(),
            platform: self.platform.platform.clone(),
            owner: self.platform.owner.clone(),
            services_count: parse::count_service_lines(&stdout),
            timestamp: response_timestamp(),
            uptime: "operational".to_string(),
        })
    }

    /// List cluster services; any schema violation fails the request
    pub async fn list_services(&self) -> Result<ServiceListing, StatusError> {
        let kubectl = &self.tools.kubectl;
        let stdout = self.run(kubectl, &["get", "services", "-o", "json"]).await?;

        let services = parse::parse_service_list(&stdout).map_err(|source| StatusError::Parse {
            program: kubectl.clone(),
            source,
        })?;

        Ok(ServiceListing {
            platform: self.platform.platform.clone(),
            owner: self.platform.owner.clone(),
            total_count: services.len(),
            services,
            timestamp: response_timestamp(),
        })
    }

    /// List images in the registry namespace, skipping unreadable records
    pub async fn registry_status(&self) -> Result<RegistryStatus, StatusError> {
        let filter = format!("{}/*", self.platform.registry);
        let stdout = self
            .run(&self.tools.docker, &["images", filter.as_str(), "--format", "json"])
            .await?;

        let (images, skipped_records) = parse::parse_image_records(&stdout);
        if skipped_records > 0 {
            info!(
                skipped = skipped_records,
                parsed = images.len(),
                "Registry listing contained malformed records"
            );
        }

        Ok(RegistryStatus {
            platform: self.platform.platform.clone(),
            registry: self.platform.registry.clone(),
            total_images: images.len(),
            images,
            timestamp: response_timestamp(),
            skipped_records,
        })
    }

    pub fn monitoring_status(&self) -> MonitoringStatus {
        MonitoringStatus {
            platform: self.platform.platform.clone(),
            monitoring: MonitoringEndpoints {
                prometheus: "http://localhost/prometheus/".to_string(),
                grafana: "http://localhost/grafana/".to_string(),
                status: "operational".to_string(),
            },
            dashboards: vec![
                "TC Enterprise Executive Dashboard".to_string(),
                "Platform Health Overview".to_string(),
                "Resource Utilization".to_string(),
            ],
            timestamp: response_timestamp(),
        }
    }

    pub fn security_status(&self) -> SecurityStatus {
        SecurityStatus {
            platform: self.platform.platform.clone(),
            security: SecurityPolicy {
                policy: "All services ClusterIP only".to_string(),
                reverse_proxy: "NGINX Ingress Controller".to_string(),
                ssl: "Let's Encrypt certificates".to_string(),
                scanning: "Trivy security scanner".to_string(),
                compliance: "SOC2/ISO27001 ready".to_string(),
            },
            trademark: self.platform.trademark.clone(),
            timestamp: response_timestamp(),
        }
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
