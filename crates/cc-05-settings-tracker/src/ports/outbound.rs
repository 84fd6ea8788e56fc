//! # Outbound Ports
//!
//! Persistence the settings tracker depends on (driven port).

use crate::domain::SettingsError;
use shared_types::NamedValueSet;

/// Loads and saves the settings of one application.
pub trait SettingsClient: Send + Sync {
    /// Current stored settings. An application with no settings yields an
    /// empty set.
    fn load_app_settings(&self, appl_name: &str) -> Result<NamedValueSet, SettingsError>;

    /// Persist `settings` for `appl_name`.
    fn save_app_settings(
        &self,
        settings: &NamedValueSet,
        appl_name: &str,
    ) -> Result<(), SettingsError>;
}
