//! # Core Domain Entities
//!
//! Defines the small enumerations and constant tables shared by the item
//! model, the session protocol and the settings tracker.
//!
//! ## Clusters
//!
//! - **Items**: `ItemKind`
//! - **Deployment**: `EnvId`
//! - **Well-known names**: `app_scope`, `sys_prop`, `app_prop`

use crate::errors::EnvParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: ITEMS
// =============================================================================

/// The kind of a cache item. Part of the item's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ItemKind {
    /// Kind not specified.
    #[default]
    Undefined,
    /// Short-lived notification.
    Signal,
    /// Application data object.
    Object,
    /// Diagnostic item.
    Debug,
    /// Infrastructure item (settings, server state).
    System,
    /// Never leaves the publishing process.
    Local,
}

impl ItemKind {
    /// All kinds in declaration order.
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Undefined,
        ItemKind::Signal,
        ItemKind::Object,
        ItemKind::Debug,
        ItemKind::System,
        ItemKind::Local,
    ];

    /// Display name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Undefined => "Undefined",
            ItemKind::Signal => "Signal",
            ItemKind::Object => "Object",
            ItemKind::Debug => "Debug",
            ItemKind::System => "System",
            ItemKind::Local => "Local",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER B: DEPLOYMENT ENVIRONMENTS
// =============================================================================

/// Deployment environment of a client or server.
///
/// Ordered from least to most elevated; the session handshake relies on the
/// ordering when comparing build environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum EnvId {
    /// Not configured.
    #[default]
    Undefined,
    /// Automated unit tests.
    Utt,
    /// Development.
    Dev,
    /// System integration test.
    Sit,
    /// Staging / live.
    Stg,
    /// Production.
    Prd,
}

impl EnvId {
    /// Short environment name (`"DEV"`, `"PRD"`, ...). `None` when undefined.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            EnvId::Undefined => None,
            EnvId::Utt => Some("UTT"),
            EnvId::Dev => Some("DEV"),
            EnvId::Sit => Some("SIT"),
            EnvId::Stg => Some("STG"),
            EnvId::Prd => Some("PRD"),
        }
    }

    /// Staging and production servers only accept signed components.
    pub fn is_elevated(&self) -> bool {
        *self >= EnvId::Stg
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Undefined"))
    }
}

impl FromStr for EnvId {
    type Err = EnvParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "UTT" => Ok(EnvId::Utt),
            "DEV" => Ok(EnvId::Dev),
            "SIT" => Ok(EnvId::Sit),
            "STG" => Ok(EnvId::Stg),
            "PRD" => Ok(EnvId::Prd),
            "" | "UNDEFINED" => Ok(EnvId::Undefined),
            _ => Err(EnvParseError {
                input: trimmed.to_string(),
            }),
        }
    }
}

// =============================================================================
// CLUSTER C: WELL-KNOWN NAMES
// =============================================================================

/// Application scope names with a fixed meaning.
pub mod app_scope {
    /// Scope of items published without an explicit scope.
    pub const LEGACY: &str = "LEGACY";
    /// Scope used for infrastructure items such as persisted settings.
    pub const SYSTEM: &str = "SYSTEM";
}

/// System property names stamped on items by publishers and stores.
pub mod sys_prop {
    /// Payload serialisation format.
    pub const S_ALG: &str = "SAlg";
    /// Uncompressed text length.
    pub const T_LEN: &str = "TLen";
    /// Payload compression algorithm.
    pub const Z_ALG: &str = "ZAlg";
    /// Compressed payload length.
    pub const Z_LEN: &str = "ZLen";
    /// Symmetric (transport) encryption algorithm.
    pub const X_ALG: &str = "XAlg";
    /// Length after symmetric encryption.
    pub const X_LEN: &str = "XLen";
    /// Asymmetric encryption / signature algorithm.
    pub const Y_ALG: &str = "YAlg";
    /// Final payload length.
    pub const Y_LEN: &str = "YLen";
    /// Transport key id.
    pub const XTKI: &str = "XTKI";
    /// Sender (signing) key id.
    pub const YSKI: &str = "YSKI";
    /// Recipient (encryption) key id.
    pub const YRKI: &str = "YRKI";
    /// Publishing application name.
    pub const APPL_NAME: &str = "ApplName";
    /// Publishing application file version.
    pub const APPL_FVER: &str = "ApplFVer";
    /// Publishing host.
    pub const HOST_NAME: &str = "HostName";
    /// Publishing user.
    pub const USER_NAME: &str = "UserName";
    /// Environment of the publisher.
    pub const ORG_ENV_ID: &str = "OrgEnvId";
    /// Node id of the publisher.
    pub const NODE_GUID: &str = "NodeGuid";
}

/// Application property names used by infrastructure items.
pub mod app_prop {
    /// Application name a settings item belongs to.
    pub const APPL_NAME: &str = "ApplName";
    /// User name a settings item applies to.
    pub const USER_NAME: &str = "UserName";
    /// Host name a settings item applies to.
    pub const HOST_NAME: &str = "HostName";
    /// Environment a settings item applies to.
    pub const ENV: &str = "Env";
}

/// Payload serialisation formats recorded under `sys_prop::S_ALG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(i32)]
pub enum SerialFormat {
    /// Raw bytes, format unknown to the cache.
    #[default]
    Undefined = 0,
    /// Binary encoding.
    Binary = 1,
    /// SOAP/XML encoding.
    Soap = 2,
    /// XML encoding.
    Xml = 3,
    /// JSON encoding.
    Json = 4,
}

impl SerialFormat {
    /// Decode a stored `SAlg` value; unknown codes map to `Undefined`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SerialFormat::Binary,
            2 => SerialFormat::Soap,
            3 => SerialFormat::Xml,
            4 => SerialFormat::Json,
            _ => SerialFormat::Undefined,
        }
    }

    /// Code stored under `SAlg`.
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_ordering() {
        assert!(EnvId::Utt < EnvId::Dev);
        assert!(EnvId::Dev < EnvId::Sit);
        assert!(EnvId::Stg < EnvId::Prd);
        assert!(EnvId::Stg.is_elevated());
        assert!(!EnvId::Sit.is_elevated());
    }

    #[test]
    fn test_env_parse_round_trip() {
        for env in [EnvId::Utt, EnvId::Dev, EnvId::Sit, EnvId::Stg, EnvId::Prd] {
            let parsed: EnvId = env.to_string().parse().unwrap();
            assert_eq!(parsed, env);
        }
        assert_eq!("dev".parse::<EnvId>().unwrap(), EnvId::Dev);
        assert!("qa".parse::<EnvId>().is_err());
    }

    #[test]
    fn test_item_kind_display() {
        assert_eq!(ItemKind::Object.to_string(), "Object");
        assert_eq!(ItemKind::default(), ItemKind::Undefined);
    }

    #[test]
    fn test_serial_format_codes() {
        assert_eq!(SerialFormat::from_code(SerialFormat::Json.code()), SerialFormat::Json);
        assert_eq!(SerialFormat::from_code(99), SerialFormat::Undefined);
    }
}
