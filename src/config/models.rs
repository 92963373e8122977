use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend resolver instances in failover priority order.
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Which request schema a backend instance speaks.
///
/// Backend APIs renamed their body fields across versions; this tag lets the
/// request builder pick the matching field names without scattering version
/// branches through the orchestration logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    Legacy,
    #[default]
    Current,
}

/// One backend resolver endpoint. Process-wide, read-only after startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstanceConfig {
    pub endpoint: Url,
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Environment variable naming this instance's API key. Keys live only in
    /// the environment, never in config files.
    #[serde(default)]
    pub auth_key_env: Option<String>,
    #[serde(default = "default_per_attempt_timeout_ms")]
    pub per_attempt_timeout_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_per_attempt_timeout_ms() -> u64 {
    20_000
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_version_uses_lowercase_tags() {
        let instance: InstanceConfig = toml::from_str(
            r#"
endpoint = "https://resolver.example/"
schema_version = "legacy"
        "#,
        )
        .unwrap();

        assert_eq!(instance.schema_version, SchemaVersion::Legacy);
    }

    #[test]
    fn instance_defaults_apply_when_fields_omitted() {
        let instance: InstanceConfig =
            toml::from_str("endpoint = \"https://resolver.example/\"").unwrap();

        assert_eq!(instance.schema_version, SchemaVersion::Current);
        assert!(instance.auth_key_env.is_none());
        assert_eq!(instance.per_attempt_timeout_ms, 20_000);
        assert_eq!(instance.max_attempts, 2);
        assert_eq!(instance.retry_delay_ms, 500);
    }
}
