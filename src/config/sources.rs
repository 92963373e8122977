use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "LINKGATE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/linkgate.toml";
const ENV_PREFIX: &str = "LINKGATE";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
///
/// Instance auth keys are NOT loaded here: each instance only names the
/// environment variable holding its key, and the registry resolves it at
/// startup.
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // Add environment variable overrides
    // LINKGATE__SERVER__BIND_ADDR -> server.bind_addr
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaVersion;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.instances.is_empty());
    }

    #[test]
    fn test_load_instances_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"

[[instances]]
endpoint = "https://primary.example/"
schema_version = "legacy"
per_attempt_timeout_ms = 15000
max_attempts = 3
retry_delay_ms = 250

[[instances]]
endpoint = "https://fallback.example/"
auth_key_env = "FALLBACK_API_KEY"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.instances.len(), 2);

        let primary = &config.instances[0];
        assert_eq!(primary.endpoint.as_str(), "https://primary.example/");
        assert_eq!(primary.schema_version, SchemaVersion::Legacy);
        assert_eq!(primary.per_attempt_timeout_ms, 15000);
        assert_eq!(primary.max_attempts, 3);
        assert_eq!(primary.retry_delay_ms, 250);

        // Omitted fields fall back to defaults
        let fallback = &config.instances[1];
        assert_eq!(fallback.schema_version, SchemaVersion::Current);
        assert_eq!(fallback.auth_key_env.as_deref(), Some("FALLBACK_API_KEY"));
        assert_eq!(fallback.per_attempt_timeout_ms, 20_000);
        assert_eq!(fallback.max_attempts, 2);
        assert_eq!(fallback.retry_delay_ms, 500);
    }
}
