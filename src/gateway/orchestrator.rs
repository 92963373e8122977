//! Retry/failover orchestration across resolver instances.
//!
//! Instances are tried strictly in registry order and exhausted one at a time;
//! attempts within an instance run sequentially with a fixed delay between
//! them. A slow or rate-limiting backend is never hammered concurrently, so
//! the caller-facing latency bound is the sum of per-instance timeout budgets.
//! The first successful attempt short-circuits the loop; a single resolve call
//! makes at most `Σ(max_attempts_i)` network calls total.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::builder;
use super::executor::{AttemptExecutor, AttemptOutcome};
use super::normalizer::{self, CanonicalResult};
use super::registry::InstanceRegistry;
use super::request::CanonicalRequest;

/// Aggregate failure message returned when every instance is exhausted.
pub const EXHAUSTED_MESSAGE: &str = "all resolver instances failed, retry later";

/// Drives the attempt executor across the instance registry.
pub struct Gateway {
    registry: InstanceRegistry,
    executor: Arc<dyn AttemptExecutor>,
}

impl Gateway {
    pub fn new(registry: InstanceRegistry, executor: Arc<dyn AttemptExecutor>) -> Self {
        Self { registry, executor }
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Resolves a canonical request into exactly one canonical result.
    ///
    /// Per-attempt failures are absorbed here: they are logged with the
    /// instance endpoint and truncated diagnostics, then either retried or
    /// failed over, but never surfaced to the caller.
    pub async fn resolve(&self, request: &CanonicalRequest) -> CanonicalResult {
        for instance in self.registry.list() {
            let timeout = Duration::from_millis(instance.config.per_attempt_timeout_ms);

            for attempt in 1..=instance.config.max_attempts {
                let outbound = builder::build(request, instance);
                let outcome = self.executor.execute(&outbound, timeout).await;

                match outcome {
                    AttemptOutcome::Success(payload) => {
                        debug!(
                            endpoint = %instance.config.endpoint,
                            attempt,
                            "backend resolved source"
                        );
                        return normalizer::normalize(&payload);
                    }
                    outcome => {
                        warn!(
                            endpoint = %instance.config.endpoint,
                            attempt,
                            max_attempts = instance.config.max_attempts,
                            outcome = outcome.kind(),
                            detail = %outcome.detail(),
                            "attempt failed"
                        );
                    }
                }

                // Delay only between attempts of the same instance; failover
                // to the next instance is immediate.
                if attempt < instance.config.max_attempts && instance.config.retry_delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(instance.config.retry_delay_ms)).await;
                }
            }

            debug!(endpoint = %instance.config.endpoint, "instance exhausted, failing over");
        }

        CanonicalResult::GatewayError {
            message: EXHAUSTED_MESSAGE.to_string(),
        }
    }
}
