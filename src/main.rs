use infraforge::config::ServerConfig;
use infraforge::runner::SystemCommandRunner;
use infraforge::server::{create_metrics, run_server, ApiState};
use infraforge::status::{StatusQueryService, Tools};
use std::sync::Arc;
use tracing::{error, info};

/// Wire the status service, command runner and metrics from config
pub fn build_state(config: &ServerConfig) -> anyhow::Result<Arc<ApiState>> {
    let runner = SystemCommandRunner::with_timeout(config.command_timeout);
    let service = StatusQueryService::new(
        Arc::new(config.platform.clone()),
        Arc::new(runner),
        Tools {
            kubectl: config.kubectl.clone(),
            docker: config.docker.clone(),
        },
    );
    let metrics = create_metrics()?;
    Ok(ApiState::new(service, metrics))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    info!(
        platform = %config.platform.platform,
        owner = %config.platform.owner,
        domain = %config.platform.domain,
        "Starting status API"
    );
    match config.command_timeout {
        Some(timeout) => info!(timeout = ?timeout, "External commands are time-limited"),
        None => info!("External commands run without a timeout"),
    }

    let state = build_state(&config)?;

    if let Err(e) = run_server(config.port, state).await {
        error!(error = %e, port = config.port, "Status API failed");
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
