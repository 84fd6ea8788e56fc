//! # CC-03 Session Control
//!
//! Handshake through which cache clients open sessions with a server.
//!
//! **Subsystem ID:** 3  
//! **Architecture:** Hexagonal (Domain + Ports + Service)
//!
//! ## Protocol
//!
//! A client sends a `SessionHeader` and a `ClientInfo` describing its
//! environments, component versions and identity. The server either grants a
//! session (fresh UUID, registered in its session table) or replies with the
//! reason for refusing. Closing removes the session; closing an unknown
//! session does nothing.
//!
//! ## Admission Checks
//!
//! | Check | Outcome on failure |
//! |-------|--------------------|
//! | config environment equal | reject |
//! | build environment >= server | reject |
//! | component version >= minimum | reject |
//! | component version >= optimal | warning |
//! | component signature (STG/PRD) | warning, reject when enforced |
//! | blocked application (SIT+) | reject |
//! | reply contract (when restricted) | reject |
//!
//! ## Module Structure
//!
//! ```text
//! cc-03-session-control/
//! ├── domain/          # records, verify_client, FileVersion, SessionError
//! ├── ports/           # SessionControl (inbound)
//! ├── service/         # SessionServer, ClientSession
//! └── config.rs        # SessionServerConfig
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::SessionServerConfig;
pub use domain::{
    check_required_file_version, verify_client, AssemblyInfo, ClientInfo, FileVersion,
    RejectReason, SessionError, SessionHeader, SessionOutcome, SessionReply, UserInfo,
};
pub use ports::SessionControl;
pub use service::{ClientSession, SessionEntry, SessionServer, SessionState};
