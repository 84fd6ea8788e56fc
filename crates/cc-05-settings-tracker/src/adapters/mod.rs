//! # Adapters Module
//!
//! Settings persistence backed by the item store.

mod store_client;

pub use store_client::StoreSettingsClient;
