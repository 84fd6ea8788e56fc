//! # Service Container
//!
//! Holds the core service instances and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Scope registry      (no dependencies)
//! Item store          (checks scopes against the registry)
//! Settings client     (persists through the item store)
//! Session server      (independent)
//! ```

use crate::config::RuntimeConfig;
use cc_02_scope_registry::{ScopeError, ScopeManager, ScopeRegistry};
use cc_03_session_control::SessionServer;
use cc_04_item_store::{InMemoryItemStore, ItemStore};
use cc_05_settings_tracker::{SettingsClient, SettingsError, SettingsTracker, StoreSettingsClient};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Central container holding every core service.
pub struct CoreContainer {
    pub config: RuntimeConfig,
    pub scopes: Arc<ScopeManager>,
    pub store: Arc<InMemoryItemStore>,
    pub settings: Arc<StoreSettingsClient>,
    pub sessions: Arc<SessionServer>,
}

impl CoreContainer {
    /// Build every service from `config`.
    ///
    /// The settings scope is registered so settings can always be saved.
    pub fn new(config: RuntimeConfig) -> Result<Self, ScopeError> {
        let scopes = Arc::new(ScopeManager::from_config(&config.scopes)?);
        scopes.add_scope(&config.settings.app_scope)?;

        let store = Arc::new(InMemoryItemStore::with_scope_registry(
            config.store.clone(),
            Arc::clone(&scopes) as Arc<dyn ScopeRegistry>,
        ));
        let settings = Arc::new(StoreSettingsClient::new(
            Arc::clone(&store) as Arc<dyn ItemStore>,
            config.settings.clone(),
        ));
        let sessions = Arc::new(SessionServer::new(config.session.clone()));

        info!(
            scopes = scopes.len(),
            config_env = %config.session.config_env,
            build_env = %config.session.build_env,
            "Core services initialized"
        );

        Ok(Self {
            config,
            scopes,
            store,
            settings,
            sessions,
        })
    }

    /// A settings tracker for `appl_name` over the store.
    pub fn settings_tracker(&self, appl_name: &str) -> Result<SettingsTracker, SettingsError> {
        SettingsTracker::new(
            Arc::clone(&self.settings) as Arc<dyn SettingsClient>,
            appl_name,
        )
    }

    /// Sweep expired items now.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }

    /// Close every open session.
    pub fn shutdown(&self) -> usize {
        let closed = self.sessions.close_all();
        info!(closed, "Sessions closed");
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_01_item_model::CommonItem;
    use shared_types::ItemKind;

    #[test]
    fn test_settings_scope_registered() {
        let container = CoreContainer::new(RuntimeConfig::default()).unwrap();
        assert!(container.scopes.exists("SYSTEM").unwrap());
        assert!(container.scopes.exists("LEGACY").unwrap());
    }

    #[test]
    fn test_invalid_settings_scope_fails() {
        let mut config = RuntimeConfig::default();
        config.settings.app_scope = "bad scope".to_string();
        assert!(CoreContainer::new(config).is_err());
    }

    #[test]
    fn test_settings_tracker_round_trip() {
        let container = CoreContainer::new(RuntimeConfig::default()).unwrap();
        let tracker = container.settings_tracker("Runtime").unwrap();
        tracker.set_new_value("threads", 4);
        tracker.close().unwrap();

        let fresh = container.settings_tracker("Runtime").unwrap();
        assert_eq!(fresh.get_set_value("threads", 1), 4);
    }

    #[test]
    fn test_purge_expired() {
        let container = CoreContainer::new(RuntimeConfig::default()).unwrap();
        container
            .store
            .save_item(CommonItem::new(ItemKind::Signal, false, "ping", None))
            .unwrap();
        container
            .store
            .delete_item(ItemKind::Signal, None, "ping")
            .unwrap();
        assert_eq!(container.purge_expired(), 1);
    }
}
