//! # Service Layer
//!
//! - `SessionServer`: server side of the handshake, owns the session table
//! - `ClientSession`: client side connection state machine

mod client_session;
mod session_server;

pub use client_session::{ClientSession, SessionState};
pub use session_server::{SessionEntry, SessionServer};
