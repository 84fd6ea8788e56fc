//! # Domain Module
//!
//! The `CommonItem` record and its errors.

pub mod errors;
pub mod item;

pub use errors::*;
pub use item::*;
