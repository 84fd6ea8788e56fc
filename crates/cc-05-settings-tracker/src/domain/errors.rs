//! # Domain Errors

use cc_01_item_model::ItemError;
use cc_04_item_store::StoreError;
use thiserror::Error;

/// Settings tracker error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The backing store failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The settings item could not be built.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Stored settings could not be decoded.
    #[error("Stored settings for '{appl_name}' are unreadable: {reason}")]
    Corrupt { appl_name: String, reason: String },
}
