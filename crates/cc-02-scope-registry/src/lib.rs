//! # CC-02 Scope Registry
//!
//! The live set of application scopes items may be published into.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (Domain + Ports + Service)
//!
//! ## Rules
//!
//! Scope names hold ASCII letters, digits, `_` and `.`; they must not start
//! with a digit or `.` and must not end with `.`. Lookups are
//! case-insensitive: every name is stored trimmed and upper-cased.
//!
//! The legacy scope (`LEGACY`) is present from startup unless disabled.
//!
//! ## Module Structure
//!
//! ```text
//! cc-02-scope-registry/
//! ├── domain/          # validate_scope_name, ScopeError
//! ├── ports/           # ScopeRegistry (inbound)
//! ├── service/         # ScopeManager
//! └── config.rs        # ScopeConfig
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::ScopeConfig;
pub use domain::{validate_scope_name, CharPosition, ScopeError};
pub use ports::ScopeRegistry;
pub use service::ScopeManager;
