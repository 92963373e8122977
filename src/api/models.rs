//! Wire models for the resolution endpoint.
//!
//! The inbound body shape lives in [`crate::gateway::ResolveRequest`]; this
//! module defines the outbound contract:
//! - [`LinkResponse`] / [`PickerResponse`] for `200` successes
//! - [`DeclinedResponse`] for backend-reported failures (still `200` — the
//!   gateway call itself worked, the resolution did not)
//! - [`ErrorResponse`] for `4xx`/`502` gateway-level errors
//!
//! A resolved link (as JSON):
//!
//! ```json
//! { "success": true, "type": "tunnel", "url": "https://cdn/x.mp4", "filename": "clip.mp4" }
//! ```
//!
//! A picker offering multiple formats:
//!
//! ```json
//! { "success": true, "type": "picker", "picks": [{ "url": "..." }], "filename": "video.mp4" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::observability::MetricsSnapshot;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LinkResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PickerResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub picks: Vec<Value>,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeclinedResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
    pub metrics: MetricsSnapshot,
}
