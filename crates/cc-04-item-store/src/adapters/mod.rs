//! # Adapters Layer
//!
//! Concrete item stores.

mod memory;

pub use memory::InMemoryItemStore;
