//! # Inbound Ports
//!
//! Session control API (driving port).

use crate::domain::{ClientInfo, SessionHeader, SessionReply};

/// Opens and closes client sessions.
pub trait SessionControl: Send + Sync {
    /// Validate a client and, on success, register a new session.
    ///
    /// Rejections come back as an unsuccessful reply carrying the reason.
    fn begin_session(&self, header: &SessionHeader, client_info: &ClientInfo) -> SessionReply;

    /// Forget the session named in `header`. Unknown sessions are ignored.
    fn close_session(&self, header: &SessionHeader);
}
