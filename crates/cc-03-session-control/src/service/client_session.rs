//! Client side of a session: `Unconnected -> Active -> Closed`.

use crate::domain::{ClientInfo, SessionError, SessionHeader};
use crate::ports::SessionControl;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Connection state of a `ClientSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No handshake has succeeded yet.
    Unconnected,
    /// Handshake succeeded.
    Active { session_id: Uuid },
    /// Closed; terminal.
    Closed,
}

/// One client's session with a server.
///
/// Dropping an active session closes it.
pub struct ClientSession {
    control: Arc<dyn SessionControl>,
    client_info: ClientInfo,
    reply_address: Option<String>,
    reply_contract: Option<String>,
    state: SessionState,
}

impl ClientSession {
    pub fn new(control: Arc<dyn SessionControl>, client_info: ClientInfo) -> Self {
        Self {
            control,
            client_info,
            reply_address: None,
            reply_contract: None,
            state: SessionState::Unconnected,
        }
    }

    /// Set where and how the server should reply.
    pub fn with_reply(mut self, address: Option<&str>, contract: Option<&str>) -> Self {
        self.reply_address = address.map(str::to_string);
        self.reply_contract = contract.map(str::to_string);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<Uuid> {
        match self.state {
            SessionState::Active { session_id } => Some(session_id),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session_id().is_some()
    }

    /// Perform the handshake. An active session returns its id unchanged.
    ///
    /// A rejection leaves the session unconnected so it can be retried.
    pub fn connect(&mut self) -> Result<Uuid, SessionError> {
        match self.state {
            SessionState::Active { session_id } => return Ok(session_id),
            SessionState::Closed => return Err(SessionError::SessionClosed),
            SessionState::Unconnected => {}
        }
        let header = SessionHeader::new(self.reply_address.as_deref(), self.reply_contract.as_deref());
        let reply = self.control.begin_session(&header, &self.client_info);
        if !reply.success {
            debug!(node_id = %self.client_info.node_id, message = %reply.message, "Handshake refused");
            return Err(SessionError::Rejected(reply.message));
        }
        self.state = SessionState::Active {
            session_id: reply.session_id,
        };
        info!(session_id = %reply.session_id, "Session active");
        Ok(reply.session_id)
    }

    /// Close the session. Closing twice is harmless.
    pub fn close(&mut self) {
        if let SessionState::Active { session_id } = self.state {
            self.control.close_session(&SessionHeader::for_session(session_id));
            info!(session_id = %session_id, "Session closed by client");
        }
        self.state = SessionState::Closed;
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        if self.is_active() {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionServerConfig;
    use crate::domain::{AssemblyInfo, UserInfo};
    use crate::service::SessionServer;
    use shared_types::EnvId;

    fn client(env: EnvId) -> ClientInfo {
        ClientInfo {
            node_id: Uuid::new_v4(),
            build_env: env,
            config_env: env,
            user_info: UserInfo::new("corp\\tester", None).unwrap(),
            component: AssemblyInfo::new("Core.Client", "1.0.1900.0"),
            ..ClientInfo::default()
        }
    }

    fn server() -> Arc<SessionServer> {
        Arc::new(SessionServer::new(SessionServerConfig::for_testing()))
    }

    #[test]
    fn test_connect_and_close() {
        let server = server();
        let mut session = ClientSession::new(server.clone(), client(EnvId::Utt));
        assert_eq!(session.state(), SessionState::Unconnected);

        let id = session.connect().unwrap();
        assert_eq!(session.state(), SessionState::Active { session_id: id });
        assert_eq!(session.connect().unwrap(), id);
        assert_eq!(server.session_count(), 1);

        session.close();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(server.session_count(), 0);
        session.close();
        assert_eq!(session.connect(), Err(SessionError::SessionClosed));
    }

    #[test]
    fn test_rejection_stays_unconnected() {
        let server = server();
        let mut session = ClientSession::new(server.clone(), client(EnvId::Prd));
        assert!(matches!(session.connect(), Err(SessionError::Rejected(_))));
        assert_eq!(session.state(), SessionState::Unconnected);
        assert_eq!(server.session_count(), 0);
    }

    #[test]
    fn test_drop_closes_active_session() {
        let server = server();
        {
            let mut session = ClientSession::new(server.clone(), client(EnvId::Utt))
                .with_reply(Some("tcp://c1"), None);
            session.connect().unwrap();
            assert_eq!(server.session_count(), 1);
        }
        assert_eq!(server.session_count(), 0);
    }
}
