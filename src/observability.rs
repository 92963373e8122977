//! Observability stubs (metrics, tracing)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording resolution counters
#[derive(Debug, Default)]
pub struct Metrics {
    resolves_succeeded: AtomicU64,
    resolves_declined: AtomicU64,
    resolves_exhausted: AtomicU64,
    requests_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend returned a link or picker result.
    pub fn resolve_succeeded(&self) {
        self.resolves_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolves_succeeded", "Metric incremented");
    }

    /// A backend explicitly declined the resolution.
    pub fn resolve_declined(&self) {
        self.resolves_declined.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolves_declined", "Metric incremented");
    }

    /// Every instance and attempt was exhausted.
    pub fn resolve_exhausted(&self) {
        self.resolves_exhausted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolves_exhausted", "Metric incremented");
    }

    /// An inbound request failed validation before any backend call.
    pub fn request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_rejected", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolves_succeeded: self.resolves_succeeded.load(Ordering::Relaxed),
            resolves_declined: self.resolves_declined.load(Ordering::Relaxed),
            resolves_exhausted: self.resolves_exhausted.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub resolves_succeeded: u64,
    pub resolves_declined: u64,
    pub resolves_exhausted: u64,
    pub requests_rejected: u64,
}
