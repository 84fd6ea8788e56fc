//! Settings persisted as items in the item store.
//!
//! Each application's settings live in one `Object` item whose payload is the
//! serialised named-value set. Saving merges into the stored settings unless
//! the config says to replace them.

use crate::config::SettingsConfig;
use crate::domain::SettingsError;
use crate::ports::SettingsClient;
use cc_01_item_model::CommonItem;
use cc_04_item_store::ItemStore;
use shared_types::{app_prop, ItemKind, NamedValueSet};
use std::sync::Arc;
use tracing::debug;

/// Data type name recorded on settings items.
pub const SETTINGS_DATA_TYPE: &str = "NamedValueSet";

/// `SettingsClient` over an `ItemStore`.
pub struct StoreSettingsClient {
    store: Arc<dyn ItemStore>,
    config: SettingsConfig,
}

impl StoreSettingsClient {
    pub fn new(store: Arc<dyn ItemStore>, config: SettingsConfig) -> Self {
        Self { store, config }
    }

    fn decode(appl_name: &str, item: &CommonItem) -> Result<NamedValueSet, SettingsError> {
        let Some(bytes) = item.y_data() else {
            return Ok(NamedValueSet::new());
        };
        let corrupt = |reason: String| SettingsError::Corrupt {
            appl_name: appl_name.to_string(),
            reason,
        };
        let text = std::str::from_utf8(bytes).map_err(|e| corrupt(e.to_string()))?;
        NamedValueSet::parse(text).map_err(|e| corrupt(e.to_string()))
    }
}

impl SettingsClient for StoreSettingsClient {
    fn load_app_settings(&self, appl_name: &str) -> Result<NamedValueSet, SettingsError> {
        let item = self.store.load_item(
            ItemKind::Object,
            Some(&self.config.app_scope),
            &self.config.item_name(appl_name),
        )?;
        match item {
            Some(item) => Self::decode(appl_name, &item),
            None => Ok(NamedValueSet::new()),
        }
    }

    fn save_app_settings(
        &self,
        settings: &NamedValueSet,
        appl_name: &str,
    ) -> Result<(), SettingsError> {
        let merged = if self.config.replace_on_save {
            settings.clone()
        } else {
            self.load_app_settings(appl_name)?.merged(settings)
        };

        let mut item = CommonItem::new(
            ItemKind::Object,
            false,
            &self.config.item_name(appl_name),
            Some(&self.config.app_scope),
        );
        item.set_app_prop(app_prop::APPL_NAME, appl_name)?;
        item.set_data_type_name(SETTINGS_DATA_TYPE)?;
        item.set_y_data(Some(merged.serialise().into_bytes()))?;
        let saved = self.store.save_item(item)?;

        debug!(
            appl_name,
            count = merged.len(),
            usn = saved.store_usn(),
            "Settings saved"
        );
        Ok(())
    }
}
