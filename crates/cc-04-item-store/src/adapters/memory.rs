//! In-memory item store.
//!
//! One mutex guards the item table and the USN counter. Subscribers are fed
//! through a `tokio::sync::broadcast` channel while that lock is held, so
//! every subscriber sees saves in USN order.

use crate::config::ItemStoreConfig;
use crate::domain::{ItemQuery, StoreError};
use crate::ports::ItemStore;
use crate::subscriber::ItemSubscription;
use cc_01_item_model::{make_unique_name, CommonItem};
use cc_02_scope_registry::ScopeRegistry;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared_types::{app_scope, ItemKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct StoreState {
    items: HashMap<String, Arc<CommonItem>>,
    last_usn: i64,
}

/// Item store held entirely in memory.
pub struct InMemoryItemStore {
    config: ItemStoreConfig,
    scopes: Option<Arc<dyn ScopeRegistry>>,
    state: Mutex<StoreState>,
    sender: broadcast::Sender<Arc<CommonItem>>,
}

impl InMemoryItemStore {
    /// Create a store that accepts any scope.
    pub fn new(config: ItemStoreConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            config,
            scopes: None,
            state: Mutex::new(StoreState::default()),
            sender,
        }
    }

    /// Create a store that checks item scopes against `scopes`.
    pub fn with_scope_registry(config: ItemStoreConfig, scopes: Arc<dyn ScopeRegistry>) -> Self {
        Self {
            scopes: Some(scopes),
            ..Self::new(config)
        }
    }

    /// Number of stored items, expired ones included.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Highest USN assigned so far.
    pub fn last_usn(&self) -> i64 {
        self.state.lock().last_usn
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn check_scope(&self, scope: &str) -> Result<(), StoreError> {
        if !self.config.validate_scopes {
            return Ok(());
        }
        let Some(registry) = &self.scopes else {
            return Ok(());
        };
        if registry.exists(scope)? {
            Ok(())
        } else {
            Err(StoreError::UnknownScope(scope.to_string()))
        }
    }

    fn key(kind: ItemKind, scope: Option<&str>, name: &str) -> String {
        let scope = scope
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(app_scope::LEGACY);
        make_unique_name(kind, scope, name)
    }
}

impl ItemStore for InMemoryItemStore {
    fn save_item(&self, mut item: CommonItem) -> Result<Arc<CommonItem>, StoreError> {
        self.check_scope(item.app_scope())?;
        item.freeze()?;

        let (stored, receivers) = {
            let mut state = self.state.lock();
            state.last_usn += 1;
            item.set_store_usn(state.last_usn);
            let stored = Arc::new(item);
            state
                .items
                .insert(stored.unique_name().to_string(), Arc::clone(&stored));
            let receivers = self.sender.send(Arc::clone(&stored)).unwrap_or(0);
            (stored, receivers)
        };

        debug!(
            unique_name = %stored.unique_name(),
            usn = stored.store_usn(),
            receivers,
            "Item saved"
        );
        Ok(stored)
    }

    fn load_item(
        &self,
        kind: ItemKind,
        app_scope: Option<&str>,
        name: &str,
    ) -> Result<Option<Arc<CommonItem>>, StoreError> {
        let key = Self::key(kind, app_scope, name);
        let item = self.state.lock().items.get(&key).cloned();
        Ok(item.filter(|item| item.is_current()))
    }

    fn load_items(&self, query: &ItemQuery) -> Result<Vec<Arc<CommonItem>>, StoreError> {
        let now = Utc::now();
        let mut items: Vec<_> = self
            .state
            .lock()
            .items
            .values()
            .filter(|item| query.matches(item, now))
            .cloned()
            .collect();
        items.sort_by_key(|item| item.store_usn());
        Ok(items)
    }

    fn delete_item(
        &self,
        kind: ItemKind,
        app_scope: Option<&str>,
        name: &str,
    ) -> Result<bool, StoreError> {
        let Some(current) = self.load_item(kind, app_scope, name)? else {
            return Ok(false);
        };
        let tombstone = current.clone_for_republish(current.transient(), true);
        let saved = self.save_item(tombstone)?;
        info!(unique_name = %saved.unique_name(), usn = saved.store_usn(), "Item deleted");
        Ok(true)
    }

    fn subscribe(&self, query: ItemQuery) -> ItemSubscription {
        debug!(query = ?query, "New item subscription");
        ItemSubscription::new(self.sender.subscribe(), query)
    }

    fn purge_expired(&self, as_at: DateTime<Utc>) -> usize {
        let purged = {
            let mut state = self.state.lock();
            let before = state.items.len();
            state.items.retain(|_, item| item.is_current_at(as_at));
            before - state.items.len()
        };
        if purged > 0 {
            info!(purged, "Expired items purged");
        }
        purged
    }
}
