//! # Core Cache Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks
//! └── src/integration/  # Cross-crate flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cc-tests
//!
//! # Benchmarks
//! cargo bench -p cc-tests
//! ```

pub mod integration;
