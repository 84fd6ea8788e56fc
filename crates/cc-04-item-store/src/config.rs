//! # Item Store Configuration

use serde::{Deserialize, Serialize};

/// Default number of saved items buffered per subscriber.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Item store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStoreConfig {
    /// Saved items buffered per subscriber before it starts lagging.
    pub channel_capacity: usize,

    /// Refuse items whose scope is not in the scope registry.
    pub validate_scopes: bool,
}

impl Default for ItemStoreConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            validate_scopes: true,
        }
    }
}

impl ItemStoreConfig {
    /// Create a config for testing (small buffer).
    pub fn for_testing() -> Self {
        Self {
            channel_capacity: 16,
            validate_scopes: true,
        }
    }
}
