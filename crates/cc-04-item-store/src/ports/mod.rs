//! # Ports Module
//!
//! The item store API consumed by publishers, the settings tracker and the
//! runtime.

pub mod inbound;

pub use inbound::*;
