//! # Core Runtime
//!
//! Entry point for the core cache server.

use anyhow::{Context, Result};
use core_runtime::{init_logging, CoreRuntime, RuntimeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;
    config.validate().context("Invalid configuration")?;

    info!(
        config_env = %config.session.config_env,
        build_env = %config.session.build_env,
        min_client_version = %config.session.min_client_version,
        "Core Runtime v{}",
        env!("CARGO_PKG_VERSION")
    );

    let runtime = CoreRuntime::new(config).context("Failed to build core services")?;
    let sweeper = runtime.start();

    info!("Core is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown();
    sweeper.await.context("Expiry sweeper panicked")?;
    Ok(())
}
