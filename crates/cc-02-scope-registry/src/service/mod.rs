//! # Service Layer
//!
//! `ScopeManager`, the in-process `ScopeRegistry`.

mod scope_manager;

pub use scope_manager::ScopeManager;
