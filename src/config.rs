//! Runtime settings for the orchestration services.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "QUILLHOST_";

/// Default settings file read from the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "quillhost.toml";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value was well-formed but unusable.
    #[error("invalid setting `{key}`: {reason}")]
    Invalid {
        /// Dotted key of the offending setting.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Top-level settings for the orchestrator.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Provisioning service client settings.
    #[serde(default)]
    pub provisioning: ProvisioningSettings,

    /// Stale-deployment sweep settings.
    #[serde(default)]
    pub reconciler: ReconcilerSettings,
}

impl OrchestratorSettings {
    /// Loads settings from the default sources.
    ///
    /// Later sources override earlier ones:
    /// 1. built-in defaults
    /// 2. `quillhost.toml` in the working directory, if present
    /// 3. `QUILLHOST_`-prefixed environment variables, with `__` separating
    ///    nested keys (`QUILLHOST_DATABASE__URL`)
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source is malformed or a value is
    /// unusable.
    pub fn load() -> SettingsResult<Self> {
        Self::from_file(DEFAULT_SETTINGS_FILE)
    }

    /// Loads settings from a specific TOML file, still honouring the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source is malformed or a value is
    /// unusable.
    pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Extracts and validates settings from an assembled figment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when extraction fails or a value is
    /// unusable.
    pub fn from_figment(figment: Figment) -> SettingsResult<Self> {
        let settings: Self = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> SettingsResult<()> {
        if self.database.max_connections == 0 {
            return Err(SettingsError::Invalid {
                key: "database.max_connections",
                reason: "must be at least 1",
            });
        }
        if self.provisioning.dispatch_timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "provisioning.dispatch_timeout_secs",
                reason: "must be at least 1",
            });
        }
        if self.reconciler.sweep_interval_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "reconciler.sweep_interval_secs",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "postgres://localhost/quillhost".to_owned()
}

const fn default_max_connections() -> u32 {
    8
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Provisioning service client settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProvisioningSettings {
    /// Base URL of the provisioning service.
    #[serde(default = "default_provisioning_url")]
    pub base_url: String,

    /// Upper bound on one submission, in seconds.
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,
}

impl ProvisioningSettings {
    /// Returns the dispatch timeout.
    #[must_use]
    pub const fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }
}

fn default_provisioning_url() -> String {
    "http://localhost:8090".to_owned()
}

const fn default_dispatch_timeout_secs() -> u64 {
    30
}

impl Default for ProvisioningSettings {
    fn default() -> Self {
        Self {
            base_url: default_provisioning_url(),
            dispatch_timeout_secs: default_dispatch_timeout_secs(),
        }
    }
}

/// Stale-deployment sweep settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReconcilerSettings {
    /// Seconds between sweep passes.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl ReconcilerSettings {
    /// Returns the sweep interval.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

const fn default_sweep_interval_secs() -> u64 {
    5
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}
