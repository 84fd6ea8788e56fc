//! # Handshake Records
//!
//! Messages exchanged when a client opens or closes a session.

use super::errors::SessionError;
use serde::{Deserialize, Serialize};
use shared_types::EnvId;
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLIENT DESCRIPTION
// =============================================================================

/// Identity of an assembly (application or client component).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyInfo {
    /// Assembly name.
    pub name: String,
    /// Assembly (API) version.
    pub version: String,
    /// File version, `Major.Minor.BuildDate.Revision`.
    pub file_version: String,
    /// Informational (product) version.
    pub info_version: String,
    /// Public-key token; `"null"` when unsigned.
    pub public_key_token: String,
    /// Opaque identity hash.
    pub hash: i32,
}

impl AssemblyInfo {
    /// Assembly with the given name and file version, otherwise blank.
    pub fn new(name: &str, file_version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: file_version.to_string(),
            file_version: file_version.to_string(),
            info_version: file_version.to_string(),
            public_key_token: "null".to_string(),
            hash: 0,
        }
    }

    /// Set the public-key token.
    pub fn with_public_key_token(mut self, token: &str) -> Self {
        self.public_key_token = token.to_string();
        self
    }
}

/// A user identity in `domain\login` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    identity_name: String,
    full_name: Option<String>,
}

impl UserInfo {
    /// Validate and build a user identity.
    pub fn new(identity_name: &str, full_name: Option<&str>) -> Result<Self, SessionError> {
        if identity_name.split('\\').count() != 2 {
            return Err(SessionError::InvalidUserIdentity(identity_name.to_string()));
        }
        Ok(Self {
            identity_name: identity_name.to_string(),
            full_name: full_name.map(str::to_string),
        })
    }

    /// `domain\login`
    pub fn identity_name(&self) -> &str {
        &self.identity_name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// The part before the backslash.
    pub fn domain(&self) -> &str {
        self.identity_name
            .split_once('\\')
            .map_or("", |(domain, _)| domain)
    }

    /// The part after the backslash.
    pub fn login(&self) -> &str {
        self.identity_name
            .split_once('\\')
            .map_or(self.identity_name.as_str(), |(_, login)| login)
    }
}

/// Everything a client tells the server when opening a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client node id.
    pub node_id: Uuid,
    /// Environment the client was built for.
    pub build_env: EnvId,
    /// Environment the client is configured for.
    pub config_env: EnvId,
    pub host_name: String,
    pub host_ipv4: Option<String>,
    pub net_addrs: Vec<String>,
    pub user_info: UserInfo,
    /// Client cache component.
    pub component: AssemblyInfo,
    /// Hosting application.
    pub application: AssemblyInfo,
}

// =============================================================================
// HEADERS AND REPLIES
// =============================================================================

/// Request header accompanying session control calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    /// Session being addressed; nil before a session exists.
    pub session_id: Uuid,
    pub request_id: Uuid,
    /// Where the server sends replies.
    pub reply_address: Option<String>,
    /// Contract the client expects replies on.
    pub reply_contract: Option<String>,
    pub more_following: bool,
    pub reply_required: bool,
    /// Ask the server to log the client description.
    pub debug_request: bool,
}

impl SessionHeader {
    /// Header for a fresh handshake.
    pub fn new(reply_address: Option<&str>, reply_contract: Option<&str>) -> Self {
        Self {
            session_id: Uuid::nil(),
            request_id: Uuid::new_v4(),
            reply_address: reply_address.map(str::to_string),
            reply_contract: reply_contract.map(str::to_string),
            more_following: false,
            reply_required: true,
            debug_request: false,
        }
    }

    /// Header addressing an existing session.
    pub fn for_session(session_id: Uuid) -> Self {
        Self {
            session_id,
            request_id: Uuid::new_v4(),
            ..Self::default()
        }
    }
}

/// Server answer to `begin_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReply {
    pub success: bool,
    /// Granted session id; nil on failure.
    pub session_id: Uuid,
    pub message: String,
}

impl SessionReply {
    /// Access granted.
    pub fn granted(session_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            success: true,
            session_id,
            message: message.into(),
        }
    }

    /// Access denied.
    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            success: false,
            session_id: Uuid::nil(),
            message: message.into(),
        }
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Why a handshake was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Client and server configured for different environments.
    EnvironmentMismatch { client: EnvId, server: EnvId },
    /// Client built for an older environment than the server.
    BuildEnvironmentTooOld { client: EnvId, server: EnvId },
    /// Client component older than the minimum version.
    ClientVersionTooOld { client: String, minimum: String },
    /// Client component not signed with the server's key.
    SignatureMismatch { client: String, server: String },
    /// Application refused in this environment.
    UnauthorisedClient {
        user: String,
        host: String,
        application: String,
    },
    /// Reply contract not offered by this server.
    UnsupportedReplyContract(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EnvironmentMismatch { client, server } => {
                write!(f, "Client environment ({client}) <> server environment ({server})!")
            }
            RejectReason::BuildEnvironmentTooOld { client, server } => write!(
                f,
                "Client build environment ({client}) < server build environment ({server})!"
            ),
            RejectReason::ClientVersionTooOld { client, minimum } => {
                write!(f, "Client version ({client}) < minimum version ({minimum})!")
            }
            RejectReason::SignatureMismatch { client, server } => {
                write!(f, "Client signature ({client}) <> server signature ({server})!")
            }
            RejectReason::UnauthorisedClient {
                user,
                host,
                application,
            } => write!(f, "Unauthorised client: {user} {host} {application}"),
            RejectReason::UnsupportedReplyContract(contract) => {
                write!(f, "ReplyContract not supported: {contract}")
            }
        }
    }
}

/// Result of validating a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Access granted under a new session id.
    Granted { session_id: Uuid },
    /// Access refused.
    Rejected(RejectReason),
}

impl SessionOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, SessionOutcome::Granted { .. })
    }

    /// The wire reply for this outcome.
    pub fn into_reply(self) -> SessionReply {
        match self {
            SessionOutcome::Granted { session_id } => {
                SessionReply::granted(session_id, "Session granted")
            }
            SessionOutcome::Rejected(reason) => SessionReply::denied(reason.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_identity_format() {
        let user = UserInfo::new("CORP\\jsmith", Some("J Smith")).unwrap();
        assert_eq!(user.domain(), "CORP");
        assert_eq!(user.login(), "jsmith");
        assert_eq!(user.full_name(), Some("J Smith"));

        assert_eq!(
            UserInfo::new("jsmith", None),
            Err(SessionError::InvalidUserIdentity("jsmith".to_string()))
        );
        assert!(UserInfo::new("a\\b\\c", None).is_err());
    }

    #[test]
    fn test_reject_messages() {
        let reason = RejectReason::BuildEnvironmentTooOld {
            client: EnvId::Dev,
            server: EnvId::Sit,
        };
        assert_eq!(
            reason.to_string(),
            "Client build environment (DEV) < server build environment (SIT)!"
        );
    }

    #[test]
    fn test_outcome_to_reply() {
        let id = Uuid::new_v4();
        let reply = SessionOutcome::Granted { session_id: id }.into_reply();
        assert!(reply.success);
        assert_eq!(reply.session_id, id);

        let reply = SessionOutcome::Rejected(RejectReason::UnsupportedReplyContract(
            "x".to_string(),
        ))
        .into_reply();
        assert!(!reply.success);
        assert!(reply.session_id.is_nil());
        assert!(reply.message.contains("ReplyContract"));
    }

    #[test]
    fn test_client_info_serde() {
        let info = ClientInfo {
            node_id: Uuid::new_v4(),
            build_env: EnvId::Dev,
            config_env: EnvId::Dev,
            host_name: "host1".to_string(),
            user_info: UserInfo::new("d\\u", None).unwrap(),
            component: AssemblyInfo::new("Core", "3.4.1723.1"),
            ..ClientInfo::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: ClientInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
