use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no resolver instances configured")]
    NoInstances,
    #[error("instance '{0}' endpoint must use http or https")]
    InvalidEndpointScheme(String),
    #[error("instance '{0}' per_attempt_timeout_ms must be greater than zero")]
    ZeroTimeout(String),
    #[error("instance '{0}' max_attempts must be at least 1")]
    ZeroAttempts(String),
}

pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.instances.is_empty() {
        return Err(ValidationError::NoInstances);
    }

    for instance in &config.instances {
        let endpoint = instance.endpoint.to_string();

        if !matches!(instance.endpoint.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidEndpointScheme(endpoint));
        }

        if instance.per_attempt_timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout(endpoint));
        }

        if instance.max_attempts == 0 {
            return Err(ValidationError::ZeroAttempts(endpoint));
        }
    }

    Ok(())
}
