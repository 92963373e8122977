//! Media-link resolution gateway.
//!
//! Turns a canonical "resolve this source URL" request into a downloadable
//! media link by querying an ordered list of independently versioned backend
//! resolver instances.
//!
//! # Architecture
//!
//! - [`CanonicalRequest`] - validated, version-independent inbound request
//! - [`InstanceRegistry`] - ordered, startup-frozen list of backend instances
//! - [`builder`] - per-schema-version outbound request construction
//! - [`AttemptExecutor`] / [`HttpExecutor`] - one bounded HTTP call, outcomes
//!   as values
//! - [`Gateway`] - sequential retry/failover loop, first success wins
//! - [`normalize`] - maps heterogeneous backend payloads onto
//!   [`CanonicalResult`]
//!
//! Each inbound request runs its failover loop in its own task; the registry
//! is the only state shared across requests and it is read-only.

pub mod builder;
mod executor;
mod normalizer;
mod orchestrator;
mod registry;
mod request;

pub use builder::OutboundRequest;
pub use executor::{AttemptExecutor, AttemptOutcome, HttpExecutor};
pub use normalizer::{CanonicalResult, DEFAULT_FILENAME, LinkKind, normalize};
pub use orchestrator::{EXHAUSTED_MESSAGE, Gateway};
pub use registry::{Instance, InstanceRegistry};
pub use request::{
    CanonicalRequest, FilenameStyle, Quality, ResolveRequest, ValidationError,
};
