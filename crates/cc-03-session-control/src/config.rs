//! # Session Server Configuration
//!
//! What a server requires of connecting clients.

use serde::{Deserialize, Serialize};
use shared_types::EnvId;

/// Oldest client component version accepted by default.
pub const DEFAULT_MIN_CLIENT_VERSION: &str = "3.4.1723.1";

/// Client component version below which a warning is logged.
pub const DEFAULT_OPTIMAL_CLIENT_VERSION: &str = "3.4.1723.1";

/// Test-agent applications refused by SIT and above.
pub const DEFAULT_BLOCKED_APPLICATIONS: &[&str] = &["QTAgent32"];

/// Session server configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionServerConfig {
    /// Environment the server is configured for; clients must match.
    pub config_env: EnvId,

    /// Environment the server was built for; clients must be at least this.
    pub build_env: EnvId,

    /// Minimum client component file version.
    pub min_client_version: String,

    /// Recommended client component file version.
    pub optimal_client_version: String,

    /// Public-key token expected of client components in STG/PRD.
    pub core_signature: String,

    /// Reject (rather than warn about) signature mismatches in STG/PRD.
    pub enforce_signature: bool,

    /// Application names refused in SIT and above (case-insensitive).
    pub blocked_applications: Vec<String>,

    /// Accepted reply contracts. Empty accepts any.
    pub supported_reply_contracts: Vec<String>,
}

impl Default for SessionServerConfig {
    fn default() -> Self {
        Self {
            config_env: EnvId::Dev,
            build_env: EnvId::Dev,
            min_client_version: DEFAULT_MIN_CLIENT_VERSION.to_string(),
            optimal_client_version: DEFAULT_OPTIMAL_CLIENT_VERSION.to_string(),
            core_signature: String::new(),
            enforce_signature: false,
            blocked_applications: DEFAULT_BLOCKED_APPLICATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            supported_reply_contracts: Vec::new(),
        }
    }
}

impl SessionServerConfig {
    /// Create a config for testing (UTT environment, low version floor).
    pub fn for_testing() -> Self {
        Self {
            config_env: EnvId::Utt,
            build_env: EnvId::Utt,
            min_client_version: "1.0.0.0".to_string(),
            optimal_client_version: "1.0.0.0".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionServerConfig::default();
        assert_eq!(config.config_env, EnvId::Dev);
        assert!(!config.enforce_signature);
        assert_eq!(config.blocked_applications, vec!["QTAgent32".to_string()]);
        assert!(config.supported_reply_contracts.is_empty());
    }

    #[test]
    fn test_testing_config() {
        let config = SessionServerConfig::for_testing();
        assert_eq!(config.config_env, EnvId::Utt);
        assert_eq!(config.min_client_version, "1.0.0.0");
    }
}
