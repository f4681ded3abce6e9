//! Platform branding and runtime configuration
//!
//! Both are built once at startup and shared read-only with every handler.
//!
//! Configuration from environment variables:
//! - INFRAFORGE_PORT: listen port (default: 8080)
//! - INFRAFORGE_REGISTRY: image registry namespace (default: localhost:5000)
//! - INFRAFORGE_KUBECTL: cluster tool binary (default: kubectl)
//! - INFRAFORGE_DOCKER: container tool binary (default: docker)
//! - INFRAFORGE_COMMAND_TIMEOUT_SECS: bound on each external command (default: none)

use std::time::Duration;
use thiserror::Error;

/// Default port for the status API
pub const DEFAULT_PORT: u16 = 8080;

/// Default registry namespace used to filter image listings
pub const DEFAULT_REGISTRY: &str = "localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Fixed branding returned by every envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub platform: String,
    pub owner: String,
    pub version: String,
    pub trademark: String,
    pub domain: String,
    /// Registry namespace reported by `/registry` and used as the image filter
    pub registry: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform: "TC Enterprise DevOps Platform™".to_string(),
            owner: "Temitayo Charles".to_string(),
            version: "1.0".to_string(),
            trademark: "© 2025 Temitayo Charles. All Rights Reserved.".to_string(),
            domain: "temitayocharles.online".to_string(),
            registry: DEFAULT_REGISTRY.to_string(),
        }
    }
}

/// Process-level settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub kubectl: String,
    pub docker: String,
    /// `None` leaves external commands unbounded
    pub command_timeout: Option<Duration>,
    pub platform: PlatformConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            kubectl: "kubectl".to_string(),
            docker: "docker".to_string(),
            command_timeout: None,
            platform: PlatformConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create config from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("INFRAFORGE_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "INFRAFORGE_PORT",
                    value: value.clone(),
                    reason: e.to_string(),
                })?,
            None => defaults.port,
        };

        let command_timeout = match get("INFRAFORGE_COMMAND_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: "INFRAFORGE_COMMAND_TIMEOUT_SECS",
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: "INFRAFORGE_COMMAND_TIMEOUT_SECS",
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut platform = defaults.platform;
        if let Some(registry) = get("INFRAFORGE_REGISTRY") {
            platform.registry = registry;
        }

        Ok(Self {
            port,
            kubectl: get("INFRAFORGE_KUBECTL").unwrap_or(defaults.kubectl),
            docker: get("INFRAFORGE_DOCKER").unwrap_or(defaults.docker),
            command_timeout,
            platform,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
