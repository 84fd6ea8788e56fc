//! Concurrent scope table guarded by a single mutex.
//!
//! Names are validated before the lock is taken and log lines are emitted
//! after it is released.

use crate::config::ScopeConfig;
use crate::domain::{validate_scope_name, ScopeError};
use crate::ports::ScopeRegistry;
use parking_lot::Mutex;
use shared_types::app_scope;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug)]
struct ScopeTable {
    scopes: BTreeSet<String>,
    default_app_scope: String,
    legacy_disabled: bool,
}

/// In-process scope registry.
#[derive(Debug)]
pub struct ScopeManager {
    table: Mutex<ScopeTable>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        let mut scopes = BTreeSet::new();
        scopes.insert(app_scope::LEGACY.to_string());
        Self {
            table: Mutex::new(ScopeTable {
                scopes,
                default_app_scope: app_scope::LEGACY.to_string(),
                legacy_disabled: false,
            }),
        }
    }
}

impl ScopeManager {
    /// Create a registry holding only the legacy scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from configuration.
    pub fn from_config(config: &ScopeConfig) -> Result<Self, ScopeError> {
        let mut scopes = config
            .initial_scopes
            .iter()
            .map(|s| validate_scope_name(s))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let default_app_scope = validate_scope_name(&config.default_app_scope)?;
        scopes.insert(default_app_scope.clone());
        if !config.legacy_disabled {
            scopes.insert(app_scope::LEGACY.to_string());
        }
        info!(
            scopes = scopes.len(),
            default_app_scope = %default_app_scope,
            legacy_disabled = config.legacy_disabled,
            "Scope registry initialised"
        );
        Ok(Self {
            table: Mutex::new(ScopeTable {
                scopes,
                default_app_scope,
                legacy_disabled: config.legacy_disabled,
            }),
        })
    }

    /// Number of registered scopes.
    pub fn len(&self) -> usize {
        self.table.lock().scopes.len()
    }

    /// True when no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.table.lock().scopes.is_empty()
    }
}

impl ScopeRegistry for ScopeManager {
    fn add_scope(&self, name: &str) -> Result<(), ScopeError> {
        let canonical = validate_scope_name(name)?;
        let added = self.table.lock().scopes.insert(canonical.clone());
        if added {
            debug!(scope = %canonical, "Scope added");
        }
        Ok(())
    }

    fn add_scopes(&self, names: &[&str]) -> Result<(), ScopeError> {
        let canonical = names
            .iter()
            .map(|n| validate_scope_name(n))
            .collect::<Result<Vec<_>, _>>()?;
        let added = {
            let mut table = self.table.lock();
            canonical
                .into_iter()
                .filter(|s| table.scopes.insert(s.clone()))
                .count()
        };
        debug!(added, "Scopes added");
        Ok(())
    }

    fn set_scopes(&self, names: &[&str]) -> Result<(), ScopeError> {
        let scopes = names
            .iter()
            .map(|n| validate_scope_name(n))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let count = scopes.len();
        self.table.lock().scopes = scopes;
        info!(scopes = count, "Scope set replaced");
        Ok(())
    }

    fn exists(&self, name: &str) -> Result<bool, ScopeError> {
        let canonical = validate_scope_name(name)?;
        Ok(self.table.lock().scopes.contains(&canonical))
    }

    fn all_scopes(&self) -> Vec<String> {
        self.table.lock().scopes.iter().cloned().collect()
    }

    fn default_app_scope(&self) -> String {
        self.table.lock().default_app_scope.clone()
    }

    fn set_default_app_scope(&self, name: &str) -> Result<(), ScopeError> {
        let canonical = validate_scope_name(name)?;
        {
            let mut table = self.table.lock();
            table.scopes.insert(canonical.clone());
            table.default_app_scope = canonical.clone();
        }
        info!(default_app_scope = %canonical, "Default scope changed");
        Ok(())
    }

    fn legacy_disabled(&self) -> bool {
        self.table.lock().legacy_disabled
    }

    fn set_legacy_disabled(&self, disabled: bool) {
        {
            let mut table = self.table.lock();
            table.legacy_disabled = disabled;
            if disabled {
                table.scopes.remove(app_scope::LEGACY);
            } else {
                table.scopes.insert(app_scope::LEGACY.to_string());
            }
        }
        info!(legacy_disabled = disabled, "Legacy scope toggled");
    }
}
