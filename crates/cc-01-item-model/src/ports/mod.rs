//! # Ports Module
//!
//! Dependencies the item model reaches through traits.

pub mod outbound;

pub use outbound::*;
