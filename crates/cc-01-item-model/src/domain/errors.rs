//! # Domain Errors
//!
//! Error types for the item model.

use thiserror::Error;

/// Item model error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The envelope was mutated after `freeze`.
    #[error("Item already frozen: {unique_name}")]
    Frozen {
        /// Unique name of the frozen item
        unique_name: String,
    },

    /// `freeze` was called on an item without a name.
    #[error("Item name not set")]
    NameNotSet,

    /// A typed payload could not be encoded or decoded.
    #[error("Payload serialization failed: {0}")]
    Serialization(String),

    /// The signer does not hold the requested key.
    #[error("Unknown signing key: {0}")]
    UnknownSigningKey(String),
}
