//! Ordered registry of backend resolver instances.
//!
//! The registry is pure configuration data: it is built once at startup from
//! [`InstanceConfig`] entries and never mutated afterwards. Auth keys are
//! resolved from the process environment at construction time so that the
//! per-request path performs no environment lookups.

use std::env;

use tracing::warn;

use crate::config::InstanceConfig;

/// One backend resolver endpoint with its startup-resolved auth key.
#[derive(Debug, Clone)]
pub struct Instance {
    pub config: InstanceConfig,
    /// Resolved from `config.auth_key_env`; `None` means unauthenticated.
    pub auth_key: Option<String>,
}

/// Fixed-priority list of resolver instances. First entry is the primary
/// backend; later entries are failover targets.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: Vec<Instance>,
}

impl InstanceRegistry {
    /// Builds the registry, resolving each instance's auth key from the
    /// environment. A named but unset or empty variable downgrades the
    /// instance to unauthenticated with a warning.
    pub fn from_config(configs: &[InstanceConfig]) -> Self {
        let instances = configs
            .iter()
            .cloned()
            .map(|config| {
                let auth_key = config.auth_key_env.as_deref().and_then(|var| {
                    lookup_auth_key(var, config.endpoint.as_str())
                });
                Instance { config, auth_key }
            })
            .collect();

        Self { instances }
    }

    /// Instances in priority order.
    pub fn list(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

fn lookup_auth_key(var: &str, endpoint: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            warn!(var, endpoint, "auth key variable is empty, sending unauthenticated");
            None
        }
        Err(_) => {
            warn!(var, endpoint, "auth key variable not set, sending unauthenticated");
            None
        }
    }
}
