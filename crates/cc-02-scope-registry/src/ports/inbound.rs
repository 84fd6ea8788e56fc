//! # Inbound Ports
//!
//! The scope registry API (driving port).

use crate::domain::ScopeError;

/// Registry of legal application scopes.
///
/// Every operation taking a name validates it first; lookups and inserts use
/// the canonical (upper-case) form.
pub trait ScopeRegistry: Send + Sync {
    /// Register a scope. Adding an existing scope is a no-op.
    fn add_scope(&self, name: &str) -> Result<(), ScopeError>;

    /// Register several scopes. All names are validated before any insert.
    fn add_scopes(&self, names: &[&str]) -> Result<(), ScopeError>;

    /// Replace the whole scope set atomically.
    fn set_scopes(&self, names: &[&str]) -> Result<(), ScopeError>;

    /// True when the (validated) scope is registered.
    fn exists(&self, name: &str) -> Result<bool, ScopeError>;

    /// Snapshot of registered scope names, sorted.
    fn all_scopes(&self) -> Vec<String>;

    /// Scope used when a publisher supplies none.
    fn default_app_scope(&self) -> String;

    /// Change the default scope, registering it if needed.
    fn set_default_app_scope(&self, name: &str) -> Result<(), ScopeError>;

    /// True when the legacy scope has been switched off.
    fn legacy_disabled(&self) -> bool;

    /// Remove (`true`) or restore (`false`) the legacy scope.
    fn set_legacy_disabled(&self, disabled: bool);
}
