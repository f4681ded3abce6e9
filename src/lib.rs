pub mod config;
pub mod runner;
pub mod server;
pub mod status;

pub use crate::config::{PlatformConfig, ServerConfig};
pub use crate::status::{StatusError, StatusQueryService};
