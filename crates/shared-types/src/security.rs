//! # Payload Hashing and Signing
//!
//! Items identify their payload by a 128-bit content hash and may carry an
//! HMAC-SHA256 signature over the payload bytes.
//!
//! ## Security Properties
//!
//! - **Content Hash**: First 16 bytes of SHA-256 over the payload. An absent
//!   payload hashes to `ContentHash::ZERO`.
//! - **Signatures**: HMAC-SHA256, verified in constant time.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 signature.
pub const SIGNATURE_LEN: usize = 32;

// =============================================================================
// CONTENT HASH
// =============================================================================

/// 128-bit identity of an item payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 16]);

impl ContentHash {
    /// Hash of an absent payload.
    pub const ZERO: ContentHash = ContentHash([0u8; 16]);

    /// True for the hash of an absent payload.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The hash viewed as a UUID, as it appears on the wire.
    pub fn as_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.0)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Compute the content hash of a payload.
pub fn content_hash(payload: Option<&[u8]>) -> ContentHash {
    let Some(bytes) = payload else {
        return ContentHash::ZERO;
    };
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..16]);
    ContentHash(out)
}

// =============================================================================
// HMAC SIGNATURES
// =============================================================================

/// Sign payload bytes with HMAC-SHA256.
pub fn sign_payload(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so construction cannot fail.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return Vec::new();
    };
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Verify an HMAC-SHA256 signature in constant time.
pub fn verify_payload_signature(payload: &[u8], signature: &[u8], secret: &[u8]) -> bool {
    if signature.len() != SIGNATURE_LEN {
        return false;
    }
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(signature).is_ok()
}
