//! # Item Subscriptions
//!
//! Saved items are broadcast to every subscriber; each subscription filters
//! the stream with its own `ItemQuery`.

use crate::domain::{ItemQuery, StoreError};
use cc_01_item_model::CommonItem;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// A handle receiving saved items that match a query.
pub struct ItemSubscription {
    receiver: broadcast::Receiver<Arc<CommonItem>>,
    query: ItemQuery,
}

impl ItemSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<Arc<CommonItem>>, query: ItemQuery) -> Self {
        Self { receiver, query }
    }

    /// Wait for the next matching item. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<Arc<CommonItem>> {
        loop {
            let item = match self.receiver.recv().await {
                Ok(item) => item,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some items dropped");
                    continue;
                }
            };
            if self.query.matches(&item, Utc::now()) {
                return Some(item);
            }
        }
    }

    /// Take the next matching item without waiting.
    ///
    /// `Ok(None)` when nothing is pending.
    pub fn try_next(&mut self) -> Result<Option<Arc<CommonItem>>, StoreError> {
        loop {
            let item = match self.receiver.try_recv() {
                Ok(item) => item,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(StoreError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some items dropped");
                    continue;
                }
            };
            if self.query.matches(&item, Utc::now()) {
                return Ok(Some(item));
            }
        }
    }

    /// Drain every pending matching item.
    pub fn drain(&mut self) -> Result<Vec<Arc<CommonItem>>, StoreError> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next()? {
            items.push(item);
        }
        Ok(items)
    }

    pub fn query(&self) -> &ItemQuery {
        &self.query
    }
}
