//! Server side of the session handshake.

use crate::config::SessionServerConfig;
use crate::domain::{verify_client, ClientInfo, SessionHeader, SessionOutcome, SessionReply};
use crate::ports::SessionControl;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A registered client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub session_id: Uuid,
    pub node_id: Uuid,
    pub user: String,
    pub host_name: String,
    pub application: String,
    pub client_version: String,
    pub reply_address: Option<String>,
    pub reply_contract: Option<String>,
    pub opened: DateTime<Utc>,
}

/// Validates connecting clients and tracks open sessions.
#[derive(Debug)]
pub struct SessionServer {
    config: SessionServerConfig,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionServer {
    pub fn new(config: SessionServerConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionServerConfig {
        &self.config
    }

    /// Validate a client and register a session when it passes.
    pub fn admit(&self, header: &SessionHeader, client: &ClientInfo) -> SessionOutcome {
        if let Err(reason) = verify_client(header, client, &self.config) {
            warn!(
                node_id = %client.node_id,
                reply_address = ?header.reply_address,
                "Connection rejected: {reason}"
            );
            return SessionOutcome::Rejected(reason);
        }

        let session_id = Uuid::new_v4();
        let entry = SessionEntry {
            session_id,
            node_id: client.node_id,
            user: client.user_info.identity_name().to_string(),
            host_name: client.host_name.clone(),
            application: client.application.name.clone(),
            client_version: client.component.file_version.clone(),
            reply_address: header.reply_address.clone(),
            reply_contract: header.reply_contract.clone(),
            opened: Utc::now(),
        };
        let count = {
            let mut sessions = self.sessions.lock();
            sessions.insert(session_id, entry);
            sessions.len()
        };

        info!(
            session_id = %session_id,
            node_id = %client.node_id,
            user = %client.user_info.identity_name(),
            host = %client.host_name,
            application = %client.application.name,
            sessions = count,
            "Session granted"
        );
        if header.debug_request {
            debug!(
                full_name = ?client.user_info.full_name(),
                application_version = %client.application.file_version,
                component = %client.component.name,
                component_version = %client.component.file_version,
                config_env = %client.config_env,
                build_env = %client.build_env,
                reply_contract = ?header.reply_contract,
                "Client details"
            );
        }
        SessionOutcome::Granted { session_id }
    }

    /// Number of open sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Details of an open session.
    pub fn session_info(&self, session_id: Uuid) -> Option<SessionEntry> {
        self.sessions.lock().get(&session_id).cloned()
    }

    /// Ids of all open sessions.
    pub fn session_ids(&self) -> Vec<Uuid> {
        self.sessions.lock().keys().copied().collect()
    }

    /// Drop every session, returning how many were open.
    pub fn close_all(&self) -> usize {
        let closed = {
            let mut sessions = self.sessions.lock();
            let n = sessions.len();
            sessions.clear();
            n
        };
        info!(closed, "All sessions closed");
        closed
    }
}

impl SessionControl for SessionServer {
    fn begin_session(&self, header: &SessionHeader, client_info: &ClientInfo) -> SessionReply {
        self.admit(header, client_info).into_reply()
    }

    fn close_session(&self, header: &SessionHeader) {
        let removed = self.sessions.lock().remove(&header.session_id);
        match removed {
            Some(entry) => info!(
                session_id = %entry.session_id,
                node_id = %entry.node_id,
                "Session closed"
            ),
            None => debug!(session_id = %header.session_id, "Close for unknown session ignored"),
        }
    }
}
