//! # CC-01 Item Model
//!
//! The `CommonItem` record distributed by the core cache.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! An item couples a fixed identity (`id`, kind, scope, name) with an
//! envelope (timestamps, property sets, payload, signature) that is sealed by
//! `freeze`. Stores, publishers and the settings tracker all exchange items.
//!
//! ## Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | `id` never changes | no setter |
//! | `unique_name` is stable | `OnceLock` over immutable identity fields |
//! | payload hash matches payload | `set_y_data` recomputes both together |
//! | frozen envelope is read-only | mutators return `ItemError::Frozen` |
//!
//! ## Module Structure
//!
//! ```text
//! cc-01-item-model/
//! ├── domain/          # CommonItem, ItemRecord, ItemError
//! ├── ports/           # ItemSigner (outbound)
//! ├── adapters/        # HmacItemSigner
//! └── config.rs        # SizeEstimate
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{HmacItemSigner, HMAC_SHA256_ALG};
pub use config::SizeEstimate;
pub use domain::{make_unique_name, max_lifetime, CommonItem, ItemError, ItemRecord};
pub use ports::ItemSigner;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
