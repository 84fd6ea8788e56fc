//! Logging setup.
//!
//! The filter comes from `LoggingConfig::log_level` alone. Environment
//! overrides are folded in by `RuntimeConfig`, where `CC_LOG_LEVEL` wins
//! over `RUST_LOG`.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging could not be installed.
#[derive(Debug, Error)]
#[error("Logging init failed: {0}")]
pub struct TelemetryError(String);

/// Build the filter for `config`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError(e.to_string()))
}

/// Install the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError(e.to_string()))?;
    }

    tracing::info!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
