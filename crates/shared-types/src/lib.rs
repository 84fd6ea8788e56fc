//! # Shared Types Crate
//!
//! This crate contains the value types every core-cache crate agrees on:
//! named-value sets, item kinds, environment ids, the well-known property and
//! scope names, and the hashing/signing helpers used by items.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Property names and scope constants live here
//!   and nowhere else.
//! - **Typed Properties**: `NamedValueSet` carries typed values; a lookup with
//!   the wrong type is a miss, never a silent conversion.
//! - **Stable Text Form**: Property sets serialise to a compact line format so
//!   they can be stored, logged and size-estimated.

pub mod entities;
pub mod errors;
pub mod named_values;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use named_values::{NamedValue, NamedValueSet, NamedValueType, Value, ValueType};
pub use security::{content_hash, sign_payload, verify_payload_signature, ContentHash};
