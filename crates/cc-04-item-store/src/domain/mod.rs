//! # Domain Module
//!
//! Store errors and item queries.

pub mod errors;
pub mod query;

pub use errors::*;
pub use query::*;
