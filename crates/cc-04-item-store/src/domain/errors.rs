//! # Domain Errors
//!
//! Error types for item stores. Backing-store failures propagate to callers
//! unchanged.

use cc_01_item_model::ItemError;
use cc_02_scope_registry::ScopeError;
use thiserror::Error;

/// Item store error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The item could not be frozen.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The item's scope is not a valid scope name.
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// The item's scope is valid but not registered.
    #[error("Unknown application scope: {0}")]
    UnknownScope(String),

    /// The backing store failed.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store was dropped while a subscriber was waiting.
    #[error("Subscription closed")]
    Closed,
}
