//! # disco-config
//!
//! Layered configuration loading for Disco using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DISCO_*` prefix, `__` as separator)
//! 2. Project-level `.disco/config.toml`
//! 3. User-level `~/.config/disco/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DISCO_SERVER__BIND` -> `server.bind`,
//! `DISCO_WORKFLOW__STRICT_TRANSITIONS` -> `workflow.strict_transitions`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! `.env` files are the binary's concern; load them before calling
//! [`DiscoConfig::load`] so their values reach the env provider.
//!
//! ```no_run
//! use disco_config::DiscoConfig;
//!
//! let config = DiscoConfig::load().expect("config");
//! println!("API listens on {}", config.server.bind);
//! ```

mod client;
mod database;
mod error;
mod server;
mod workflow;

pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding the project-local config and the default database file.
pub const PROJECT_DIR: &str = ".disco";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DiscoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl DiscoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config

        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("DISCO_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.client.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("disco").join("config.toml"))
    }
}
