//! # Domain Errors
//!
//! Error types for session control. Handshake rejections are outcomes, not
//! errors; see `SessionOutcome`.

use thiserror::Error;

/// Session control error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// User identity not in `domain\login` form.
    #[error("User identity '{0}' not in domain\\login format")]
    InvalidUserIdentity(String),

    /// A version string is not dotted `Major.Minor.BuildDate[.Revision]`.
    #[error("Invalid version '{0}': expected Major.Minor.BuildDate.Revision")]
    InvalidVersion(String),

    /// The server refused the handshake.
    #[error("Session rejected: {0}")]
    Rejected(String),

    /// The session was closed and cannot be reopened.
    #[error("Session closed")]
    SessionClosed,
}
