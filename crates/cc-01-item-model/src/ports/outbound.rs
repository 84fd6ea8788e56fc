//! # Outbound Ports
//!
//! Publisher signing is delegated to a key holder outside the item model.

use crate::domain::ItemError;

/// Signs and verifies item payloads with named keys.
pub trait ItemSigner: Send + Sync {
    /// Algorithm code recorded under the `YAlg` system property. Must be > 0.
    fn algorithm(&self) -> i32;

    /// Produce a signature over `payload` with the key `key_id`.
    fn sign(&self, key_id: &str, payload: &[u8]) -> Result<Vec<u8>, ItemError>;

    /// Check a signature produced by the key `key_id`.
    fn verify(&self, key_id: &str, payload: &[u8], signature: &[u8]) -> bool;
}
