//! # qw-config
//!
//! Layered configuration loading for quizwright using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUIZWRIGHT_*` prefix, `__` as separator)
//! 2. Project-level `.quizwright/config.toml`
//! 3. User-level `~/.config/quizwright/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUIZWRIGHT_REPAIR__BATCH_SIZE` -> `repair.batch_size`,
//! `QUIZWRIGHT_AUDIT__OUT_DIR` -> `audit.out_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use qw_config::QwConfig;
//!
//! let config = QwConfig::load_with_dotenv().expect("config");
//! println!("backups go to {}", config.repair.backup_dir);
//! ```

mod audit;
mod error;
mod general;
mod generator;
mod quota;
mod repair;
mod store;

pub use audit::AuditConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use generator::GeneratorConfig;
pub use quota::QuotaConfig;
pub use repair::RepairConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QwConfig {
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub repair: RepairConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QwConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`QwConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with an explicit config file layered above the discovered ones.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let figment = Self::figment()
            .merge(Toml::file(path))
            .merge(Env::prefixed("QUIZWRIGHT_").split("__"));
        Self::from_figment(&figment)
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".quizwright/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QUIZWRIGHT_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quota.validate()?;
        self.repair.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quizwright").join("config.toml"))
    }
}
