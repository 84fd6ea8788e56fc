//! # Ports Module
//!
//! The registry API consumed by stores and the runtime.

pub mod inbound;

pub use inbound::*;
