//! # Client Admission
//!
//! Checks applied to a connecting client, in order:
//!
//! 1. Config environment equal to the server's
//! 2. Build environment at least the server's
//! 3. Component version at least the minimum (below optimal only warns)
//! 4. Component signature in STG/PRD (warns unless enforced)
//! 5. Blocked applications in SIT and above
//! 6. Reply contract, when the server restricts them
//!
//! The first failing check decides the rejection.

use super::types::{ClientInfo, RejectReason, SessionHeader};
use super::version::check_required_file_version;
use crate::config::SessionServerConfig;
use shared_types::EnvId;
use tracing::warn;

/// Decide whether `client` may open a session.
pub fn verify_client(
    header: &SessionHeader,
    client: &ClientInfo,
    config: &SessionServerConfig,
) -> Result<(), RejectReason> {
    // -------------------------------------------------------------------------
    // Environments
    // -------------------------------------------------------------------------

    if client.config_env != config.config_env {
        return Err(RejectReason::EnvironmentMismatch {
            client: client.config_env,
            server: config.config_env,
        });
    }

    if client.build_env < config.build_env {
        return Err(RejectReason::BuildEnvironmentTooOld {
            client: client.build_env,
            server: config.build_env,
        });
    }

    // -------------------------------------------------------------------------
    // Component version
    // -------------------------------------------------------------------------

    let client_version = &client.component.file_version;
    if !check_required_file_version(&config.min_client_version, client_version) {
        return Err(RejectReason::ClientVersionTooOld {
            client: client_version.clone(),
            minimum: config.min_client_version.clone(),
        });
    }

    if !check_required_file_version(&config.optimal_client_version, client_version) {
        warn!(
            client_version = %client_version,
            optimal_version = %config.optimal_client_version,
            node_id = %client.node_id,
            "Client version below optimal version"
        );
    }

    // -------------------------------------------------------------------------
    // Signature (STG/PRD only)
    // -------------------------------------------------------------------------

    if config.config_env.is_elevated()
        && client.component.public_key_token != config.core_signature
    {
        let reason = RejectReason::SignatureMismatch {
            client: client.component.public_key_token.clone(),
            server: config.core_signature.clone(),
        };
        if config.enforce_signature {
            return Err(reason);
        }
        warn!(node_id = %client.node_id, "{reason}");
    }

    // -------------------------------------------------------------------------
    // Blocked applications (SIT and above)
    // -------------------------------------------------------------------------

    if config.config_env >= EnvId::Sit
        && config
            .blocked_applications
            .iter()
            .any(|app| app.eq_ignore_ascii_case(&client.application.name))
    {
        return Err(RejectReason::UnauthorisedClient {
            user: client.user_info.identity_name().to_string(),
            host: client.host_name.clone(),
            application: client.application.name.clone(),
        });
    }

    // -------------------------------------------------------------------------
    // Reply contract
    // -------------------------------------------------------------------------

    if !config.supported_reply_contracts.is_empty() {
        let contract = header.reply_contract.as_deref().unwrap_or("");
        if !config.supported_reply_contracts.iter().any(|c| c == contract) {
            return Err(RejectReason::UnsupportedReplyContract(contract.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssemblyInfo, UserInfo};
    use uuid::Uuid;

    fn client(env: EnvId, version: &str) -> ClientInfo {
        ClientInfo {
            node_id: Uuid::new_v4(),
            build_env: env,
            config_env: env,
            host_name: "host1".to_string(),
            user_info: UserInfo::new("corp\\tester", None).unwrap(),
            component: AssemblyInfo::new("Core.Client", version),
            application: AssemblyInfo::new("Trader", "1.0.0.0"),
            ..ClientInfo::default()
        }
    }

    fn server(env: EnvId) -> SessionServerConfig {
        SessionServerConfig {
            config_env: env,
            build_env: env,
            min_client_version: "3.4.1723.1".to_string(),
            optimal_client_version: "3.4.1800.1".to_string(),
            ..SessionServerConfig::default()
        }
    }

    fn header() -> SessionHeader {
        SessionHeader::new(Some("tcp://client:9000"), Some("Transfer.V341"))
    }

    #[test]
    fn test_accepts_matching_client() {
        assert_eq!(
            verify_client(&header(), &client(EnvId::Dev, "3.4.1723.1"), &server(EnvId::Dev)),
            Ok(())
        );
    }

    #[test]
    fn test_rejects_environment_mismatch() {
        let result = verify_client(&header(), &client(EnvId::Sit, "3.4.1723.1"), &server(EnvId::Dev));
        assert_eq!(
            result,
            Err(RejectReason::EnvironmentMismatch {
                client: EnvId::Sit,
                server: EnvId::Dev
            })
        );
    }

    #[test]
    fn test_rejects_older_build_environment() {
        let mut c = client(EnvId::Sit, "3.4.1723.1");
        c.build_env = EnvId::Dev;
        let result = verify_client(&header(), &c, &server(EnvId::Sit));
        assert!(matches!(result, Err(RejectReason::BuildEnvironmentTooOld { .. })));
    }

    #[test]
    fn test_newer_build_environment_is_fine() {
        let mut c = client(EnvId::Dev, "3.4.1723.1");
        c.build_env = EnvId::Prd;
        assert!(verify_client(&header(), &c, &server(EnvId::Dev)).is_ok());
    }

    #[test]
    fn test_rejects_old_component() {
        let result = verify_client(&header(), &client(EnvId::Dev, "3.4.1700.1"), &server(EnvId::Dev));
        assert!(matches!(result, Err(RejectReason::ClientVersionTooOld { .. })));
    }

    #[test]
    fn test_rejects_malformed_component_version() {
        let result = verify_client(&header(), &client(EnvId::Dev, "unknown"), &server(EnvId::Dev));
        assert!(matches!(result, Err(RejectReason::ClientVersionTooOld { .. })));
    }

    #[test]
    fn test_signature_mismatch_is_soft_by_default() {
        let mut config = server(EnvId::Stg);
        config.core_signature = "abc123".to_string();
        let c = client(EnvId::Stg, "3.4.1723.1");
        assert!(verify_client(&header(), &c, &config).is_ok());

        config.enforce_signature = true;
        assert!(matches!(
            verify_client(&header(), &c, &config),
            Err(RejectReason::SignatureMismatch { .. })
        ));

        let signed = ClientInfo {
            component: AssemblyInfo::new("Core.Client", "3.4.1723.1").with_public_key_token("abc123"),
            ..c
        };
        assert!(verify_client(&header(), &signed, &config).is_ok());
    }

    #[test]
    fn test_signature_not_checked_below_staging() {
        let mut config = server(EnvId::Sit);
        config.core_signature = "abc123".to_string();
        config.enforce_signature = true;
        assert!(verify_client(&header(), &client(EnvId::Sit, "3.4.1723.1"), &config).is_ok());
    }

    #[test]
    fn test_blocked_application() {
        let mut c = client(EnvId::Sit, "3.4.1723.1");
        c.application = AssemblyInfo::new("qtagent32", "1.0.0.0");
        assert!(matches!(
            verify_client(&header(), &c, &server(EnvId::Sit)),
            Err(RejectReason::UnauthorisedClient { .. })
        ));

        let mut dev = client(EnvId::Dev, "3.4.1723.1");
        dev.application = AssemblyInfo::new("QTAgent32", "1.0.0.0");
        assert!(verify_client(&header(), &dev, &server(EnvId::Dev)).is_ok());
    }

    #[test]
    fn test_reply_contract_restriction() {
        let mut config = server(EnvId::Dev);
        config.supported_reply_contracts = vec!["Transfer.V341".to_string()];
        let c = client(EnvId::Dev, "3.4.1723.1");
        assert!(verify_client(&header(), &c, &config).is_ok());

        let other = SessionHeader::new(None, Some("Transfer.V200"));
        assert_eq!(
            verify_client(&other, &c, &config),
            Err(RejectReason::UnsupportedReplyContract("Transfer.V200".to_string()))
        );
    }

    #[test]
    fn test_first_failing_check_wins() {
        let mut c = client(EnvId::Sit, "0.0.0.0");
        c.build_env = EnvId::Utt;
        let result = verify_client(&header(), &c, &server(EnvId::Dev));
        assert!(matches!(result, Err(RejectReason::EnvironmentMismatch { .. })));
    }
}
