//! # Adapters Layer
//!
//! Concrete implementations of the item model ports.

mod hmac_signer;

pub use hmac_signer::{HmacItemSigner, HMAC_SHA256_ALG};
