//! # Core Runtime
//!
//! Hosts the core cache services in one process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, TOML file, `CC_*` environment)
//! 2. Install logging
//! 3. Validate configuration
//! 4. Build the service container
//! 5. Start the expiry sweeper
//!
//! ## Shutdown Sequence
//!
//! 1. Signal background tasks to stop
//! 2. Close open sessions

pub mod config;
pub mod container;
pub mod telemetry;

pub use config::{ConfigError, LoggingConfig, RuntimeConfig};
pub use container::CoreContainer;
pub use telemetry::{init_logging, TelemetryError};

use cc_02_scope_registry::ScopeError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The running core services.
pub struct CoreRuntime {
    container: Arc<CoreContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl CoreRuntime {
    pub fn new(config: RuntimeConfig) -> Result<Self, ScopeError> {
        info!("Creating core runtime");
        let container = Arc::new(CoreContainer::new(config)?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start background tasks. Must be called inside a tokio runtime.
    pub fn start(&self) -> JoinHandle<()> {
        let container = Arc::clone(&self.container);
        let mut shutdown = self.shutdown_rx.clone();
        let period = Duration::from_secs(container.config.purge_interval_secs.max(1));

        info!(purge_interval_secs = period.as_secs(), "Expiry sweeper started");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = container.purge_expired();
                        debug!(purged, "Expiry sweep done");
                    }
                    _ = shutdown.changed() => {
                        info!("Expiry sweeper stopping");
                        break;
                    }
                }
            }
        })
    }

    /// Stop background tasks and close every session.
    pub fn shutdown(&self) {
        info!("Initiating shutdown...");
        // Receivers may already be gone.
        let _ = self.shutdown_tx.send(true);
        self.container.shutdown();
        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<CoreContainer> {
        Arc::clone(&self.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_03_session_control::{
        AssemblyInfo, ClientInfo, SessionControl, SessionHeader, SessionServerConfig, UserInfo,
    };
    use shared_types::EnvId;

    fn client() -> ClientInfo {
        ClientInfo {
            config_env: EnvId::Utt,
            build_env: EnvId::Utt,
            user_info: UserInfo::new("corp\\tester", None).unwrap(),
            host_name: "host1".to_string(),
            application: AssemblyInfo::new("Tests", "1.0.0.0"),
            component: AssemblyInfo::new("Core.Client", "1.0.1900.0"),
            ..ClientInfo::default()
        }
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let config = RuntimeConfig {
            session: SessionServerConfig::for_testing(),
            purge_interval_secs: 1,
            ..RuntimeConfig::default()
        };
        let runtime = CoreRuntime::new(config).unwrap();
        let sweeper = runtime.start();

        let reply = runtime
            .container()
            .sessions
            .begin_session(&SessionHeader::new(Some("inproc://test"), Some("V131")), &client());
        assert!(reply.success);
        assert_eq!(runtime.container().sessions.session_count(), 1);

        runtime.shutdown();
        tokio::time::timeout(Duration::from_secs(2), sweeper)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(runtime.container().sessions.session_count(), 0);
    }
}
