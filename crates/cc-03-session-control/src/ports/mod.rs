//! # Ports Module
//!
//! The session control contract shared by servers and client proxies.

pub mod inbound;

pub use inbound::*;
