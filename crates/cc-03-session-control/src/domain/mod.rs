//! # Domain Module
//!
//! Handshake records, admission rules and version compatibility.

pub mod errors;
pub mod handshake;
pub mod types;
pub mod version;

pub use errors::*;
pub use handshake::*;
pub use types::*;
pub use version::*;
