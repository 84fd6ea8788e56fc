//! HMAC-SHA256 item signer over a table of shared secrets.

use crate::domain::ItemError;
use crate::ports::ItemSigner;
use shared_types::{sign_payload, verify_payload_signature};
use std::collections::HashMap;

/// `YAlg` code for HMAC-SHA256 signatures.
pub const HMAC_SHA256_ALG: i32 = 1;

/// Signs payloads with pre-shared secrets keyed by signing-key id.
#[derive(Default)]
pub struct HmacItemSigner {
    keys: HashMap<String, Vec<u8>>,
}

impl HmacItemSigner {
    /// Create a signer with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a key.
    pub fn with_key(mut self, key_id: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        self.keys.insert(key_id.into(), secret.into());
        self
    }

    /// True when the signer holds `key_id`.
    pub fn has_key(&self, key_id: &str) -> bool {
        self.keys.contains_key(key_id)
    }
}

impl std::fmt::Debug for HmacItemSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secrets.
        f.debug_struct("HmacItemSigner")
            .field("key_ids", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ItemSigner for HmacItemSigner {
    fn algorithm(&self) -> i32 {
        HMAC_SHA256_ALG
    }

    fn sign(&self, key_id: &str, payload: &[u8]) -> Result<Vec<u8>, ItemError> {
        let secret = self
            .keys
            .get(key_id)
            .ok_or_else(|| ItemError::UnknownSigningKey(key_id.to_string()))?;
        Ok(sign_payload(payload, secret))
    }

    fn verify(&self, key_id: &str, payload: &[u8], signature: &[u8]) -> bool {
        match self.keys.get(key_id) {
            Some(secret) => verify_payload_signature(payload, signature, secret),
            None => false,
        }
    }
}
