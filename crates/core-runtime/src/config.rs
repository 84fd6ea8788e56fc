//! # Runtime Configuration
//!
//! Unified configuration for every core service.
//!
//! ## Sources
//!
//! Lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. TOML file named by `CC_CONFIG_FILE`
//! 3. `CC_*` environment variables

use cc_02_scope_registry::{validate_scope_name, ScopeConfig, ScopeError};
use cc_03_session_control::{FileVersion, SessionError, SessionServerConfig};
use cc_04_item_store::ItemStoreConfig;
use cc_05_settings_tracker::SettingsConfig;
use serde::{Deserialize, Serialize};
use shared_types::EnvId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Session admission rules.
    pub session: SessionServerConfig,
    /// Initial scope registry contents.
    pub scopes: ScopeConfig,
    /// Item store settings.
    pub store: ItemStoreConfig,
    /// Application settings persistence.
    pub settings: SettingsConfig,
    /// Log output.
    pub logging: LoggingConfig,
    /// Seconds between sweeps of expired items.
    pub purge_interval_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session: SessionServerConfig::default(),
            scopes: ScopeConfig::default(),
            store: ItemStoreConfig::default(),
            settings: SettingsConfig::default(),
            logging: LoggingConfig::default(),
            purge_interval_secs: 60,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `cc_04_item_store=debug`, ...).
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An environment override could not be interpreted.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    /// The server's configuration environment must be set.
    #[error("Configuration environment is undefined")]
    UndefinedEnvironment,

    #[error(transparent)]
    Version(#[from] SessionError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl RuntimeConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("CC_CONFIG_FILE") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Read a TOML file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CC_*` overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CC_CONFIG_ENV") {
            self.session.config_env = parse_env("CC_CONFIG_ENV", &value)?;
        }
        if let Some(value) = lookup("CC_BUILD_ENV") {
            self.session.build_env = parse_env("CC_BUILD_ENV", &value)?;
        }
        if let Some(value) = lookup("CC_MIN_CLIENT_VERSION") {
            self.session.min_client_version = value;
        }
        if let Some(value) = lookup("CC_OPTIMAL_CLIENT_VERSION") {
            self.session.optimal_client_version = value;
        }
        if let Some(value) = lookup("CC_CORE_SIGNATURE") {
            self.session.core_signature = value;
        }
        if let Some(value) = lookup("CC_ENFORCE_SIGNATURE") {
            self.session.enforce_signature = parse_flag("CC_ENFORCE_SIGNATURE", &value)?;
        }
        if let Some(value) = lookup("CC_APP_SCOPES") {
            self.scopes.initial_scopes = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup("CC_DEFAULT_APP_SCOPE") {
            self.scopes.default_app_scope = value;
        }
        if let Some(value) = lookup("CC_LEGACY_DISABLED") {
            self.scopes.legacy_disabled = parse_flag("CC_LEGACY_DISABLED", &value)?;
        }
        if let Some(value) = lookup("CC_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            self.logging.log_level = value;
        }
        Ok(())
    }

    /// Check that the configuration can start a server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.config_env == EnvId::Undefined {
            return Err(ConfigError::UndefinedEnvironment);
        }
        self.session.min_client_version.parse::<FileVersion>()?;
        self.session.optimal_client_version.parse::<FileVersion>()?;
        for scope in &self.scopes.initial_scopes {
            validate_scope_name(scope)?;
        }
        validate_scope_name(&self.scopes.default_app_scope)?;
        validate_scope_name(&self.settings.app_scope)?;
        if self.purge_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "purge_interval_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env(var: &str, value: &str) -> Result<EnvId, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
