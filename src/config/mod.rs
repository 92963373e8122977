//! Configuration management for linkgate
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use linkgate::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `LINKGATE__<section>__<key>`
//!
//! Examples:
//! - `LINKGATE__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `LINKGATE__SERVER__MAX_BODY_BYTES=32768`
//!
//! Backend instance lists are defined in the TOML file; per-instance API keys
//! are referenced by environment variable name (`auth_key_env`) and resolved
//! at startup, never stored in the file.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/linkgate.toml`.
//! This can be overridden using the `LINKGATE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use models::{Config, InstanceConfig, SchemaVersion, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`LINKGATE__*`)
    /// 2. TOML file (default: `config/linkgate.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (no instances, zero timeouts, bad endpoints)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
