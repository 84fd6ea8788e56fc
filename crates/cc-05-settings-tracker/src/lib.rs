//! # CC-05 Settings Tracker
//!
//! Per-application settings with local edits held back until commit.
//!
//! **Subsystem ID:** 5  
//! **Architecture:** Hexagonal (Domain + Ports + Service + Adapters)
//!
//! ## Lifecycle
//!
//! 1. `SettingsTracker::new` loads the application's stored settings.
//! 2. `get_set_value` / `set_new_value` change the cached copy and record a delta.
//! 3. `commit` saves the delta; `commit(true)` also reloads.
//! 4. `close` (or drop) commits anything still outstanding.
//!
//! ## Module Structure
//!
//! ```text
//! cc-05-settings-tracker/
//! ├── domain/          # SettingsError
//! ├── ports/           # SettingsClient (outbound)
//! ├── service/         # SettingsTracker
//! ├── adapters/        # StoreSettingsClient
//! └── config.rs        # SettingsConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::StoreSettingsClient;
pub use config::SettingsConfig;
pub use domain::SettingsError;
pub use ports::SettingsClient;
pub use service::SettingsTracker;
