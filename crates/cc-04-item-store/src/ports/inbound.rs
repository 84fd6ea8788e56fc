//! # Inbound Ports
//!
//! Item store API (driving port).

use crate::domain::{ItemQuery, StoreError};
use crate::subscriber::ItemSubscription;
use cc_01_item_model::CommonItem;
use chrono::{DateTime, Utc};
use shared_types::ItemKind;
use std::sync::Arc;

/// A cache of items keyed by unique name.
pub trait ItemStore: Send + Sync {
    /// Freeze and store an item, replacing any item with the same unique
    /// name. Returns the stored item with its assigned USN.
    fn save_item(&self, item: CommonItem) -> Result<Arc<CommonItem>, StoreError>;

    /// The current item with this identity. `None` scope means legacy.
    fn load_item(
        &self,
        kind: ItemKind,
        app_scope: Option<&str>,
        name: &str,
    ) -> Result<Option<Arc<CommonItem>>, StoreError>;

    /// Items matching `query`, in USN order.
    fn load_items(&self, query: &ItemQuery) -> Result<Vec<Arc<CommonItem>>, StoreError>;

    /// Replace a current item with a tombstone. Returns false when there was
    /// nothing current to delete.
    fn delete_item(
        &self,
        kind: ItemKind,
        app_scope: Option<&str>,
        name: &str,
    ) -> Result<bool, StoreError>;

    /// Receive items saved from now on that match `query`.
    fn subscribe(&self, query: ItemQuery) -> ItemSubscription;

    /// Drop items that expired before `as_at`. Returns how many went.
    fn purge_expired(&self, as_at: DateTime<Utc>) -> usize;
}
