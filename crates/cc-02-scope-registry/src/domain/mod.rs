//! # Domain Module
//!
//! Scope name rules and errors.

pub mod errors;
pub mod validation;

pub use errors::*;
pub use validation::*;
