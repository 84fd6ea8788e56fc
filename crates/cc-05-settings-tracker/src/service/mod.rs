//! # Service Module

pub mod tracker;

pub use tracker::*;
