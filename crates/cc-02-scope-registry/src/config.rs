//! # Scope Registry Configuration

use serde::{Deserialize, Serialize};
use shared_types::app_scope;

/// Initial contents of a `ScopeManager`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Scopes registered at startup, in addition to the legacy scope.
    pub initial_scopes: Vec<String>,

    /// Scope assigned to items published without one.
    pub default_app_scope: String,

    /// When set, the legacy scope is not registered.
    pub legacy_disabled: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            initial_scopes: Vec::new(),
            default_app_scope: app_scope::LEGACY.to_string(),
            legacy_disabled: false,
        }
    }
}

impl ScopeConfig {
    /// Create a config for testing (two scopes, the first is the default).
    pub fn for_testing() -> Self {
        Self {
            initial_scopes: vec!["TEST".to_string(), "SYSTEM".to_string()],
            default_app_scope: "TEST".to_string(),
            legacy_disabled: false,
        }
    }
}
