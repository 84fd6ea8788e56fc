//! # Settings Configuration

use serde::{Deserialize, Serialize};
use shared_types::app_scope;

/// Where and how application settings are persisted in the item store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Scope of settings items.
    pub app_scope: String,

    /// Item name prefix; the application name follows after a dot.
    pub item_prefix: String,

    /// Overwrite stored settings on save instead of merging into them.
    pub replace_on_save: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            app_scope: app_scope::SYSTEM.to_string(),
            item_prefix: "AppSettings".to_string(),
            replace_on_save: false,
        }
    }
}

impl SettingsConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self::default()
    }

    /// Item name holding the settings of `appl_name`.
    pub fn item_name(&self, appl_name: &str) -> String {
        format!("{}.{}", self.item_prefix, appl_name)
    }
}
