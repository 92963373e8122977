//! Builds backend-specific outbound requests from a canonical request.
//!
//! Backend resolver APIs renamed their body fields across versions. This
//! module is the single place that knows the per-version field names, keeping
//! protocol drift out of the orchestration logic:
//!
//! | canonical field  | `legacy` key      | `current` key   |
//! |------------------|-------------------|-----------------|
//! | source URL       | `url`             | `url`           |
//! | quality          | `vQuality`        | `videoQuality`  |
//! | filename style   | `filenamePattern` | `filenameStyle` |
//! | audio only       | `isAudioOnly`     | `isAudioOnly`   |
//!
//! Pure data transformation; no network I/O happens here.

use serde_json::{Value, json};
use url::Url;

use super::registry::Instance;
use super::request::{CanonicalRequest, FilenameStyle, Quality};
use crate::config::SchemaVersion;

/// A fully prepared backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub endpoint: Url,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

/// Converts a canonical request into the instance's wire schema, attaching an
/// authorization header when the instance carries a resolved key.
pub fn build(request: &CanonicalRequest, instance: &Instance) -> OutboundRequest {
    let body = match instance.config.schema_version {
        SchemaVersion::Legacy => json!({
            "url": request.source_url.as_str(),
            "vQuality": quality_value(request.quality),
            "filenamePattern": filename_value(request.filename_style),
            "isAudioOnly": request.audio_only,
        }),
        SchemaVersion::Current => json!({
            "url": request.source_url.as_str(),
            "videoQuality": quality_value(request.quality),
            "filenameStyle": filename_value(request.filename_style),
            "isAudioOnly": request.audio_only,
        }),
    };

    let mut headers = vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ];

    if let Some(key) = &instance.auth_key {
        headers.push(("Authorization".to_string(), format!("Api-Key {key}")));
    }

    OutboundRequest {
        endpoint: instance.config.endpoint.clone(),
        headers,
        body,
    }
}

fn quality_value(quality: Quality) -> &'static str {
    match quality {
        Quality::Max => "max",
        Quality::Default => "720",
    }
}

fn filename_value(style: FilenameStyle) -> &'static str {
    match style {
        FilenameStyle::Classic => "classic",
        FilenameStyle::Basic => "basic",
    }
}
