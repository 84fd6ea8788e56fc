//! # CC-04 Item Store
//!
//! The cache every other component reads and publishes through.
//!
//! **Subsystem ID:** 4  
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Behaviour
//!
//! - Items are keyed by unique name; saving replaces the previous item.
//! - Saving freezes the item and assigns the next store USN.
//! - Deleting writes a tombstone (an expired republish) rather than erasing.
//! - Expired items stay until `purge_expired` sweeps them.
//! - Subscribers receive every saved item matching their query.
//!
//! ## Module Structure
//!
//! ```text
//! cc-04-item-store/
//! ├── domain/          # ItemQuery, StoreError
//! ├── ports/           # ItemStore (inbound)
//! ├── adapters/        # InMemoryItemStore
//! ├── subscriber.rs    # ItemSubscription
//! └── config.rs        # ItemStoreConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod subscriber;

// Re-exports
pub use adapters::InMemoryItemStore;
pub use config::{ItemStoreConfig, DEFAULT_CHANNEL_CAPACITY};
pub use domain::{ItemQuery, StoreError};
pub use ports::ItemStore;
pub use subscriber::ItemSubscription;
