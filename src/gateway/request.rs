//! Canonical request model for inbound resolution calls.
//!
//! The wire shape ([`ResolveRequest`]) is lenient: every field except the
//! source URL is optional and defaulted. Validation happens exactly once per
//! inbound call, producing an immutable [`CanonicalRequest`] that the rest of
//! the gateway consumes.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing source URL")]
    MissingUrl,
    #[error("source URL must be an absolute URL: {0}")]
    InvalidUrl(String),
}

/// Requested video quality, mapped to backend-specific values by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Max,
    #[default]
    Default,
}

/// Filename pattern the backend should apply to the resolved media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameStyle {
    #[default]
    Classic,
    Basic,
}

/// Raw inbound request body as received on `POST /api/download`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub url: Option<String>,
    pub audio_only: Option<bool>,
    pub quality: Option<Quality>,
    pub filename_style: Option<FilenameStyle>,
}

/// Validated, immutable resolution request. Constructed once per inbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub source_url: Url,
    pub audio_only: bool,
    pub quality: Quality,
    pub filename_style: FilenameStyle,
}

impl CanonicalRequest {
    /// Validates a raw request, applying defaults for unspecified fields.
    ///
    /// Fails with [`ValidationError::MissingUrl`] when the URL field is absent
    /// or empty, and [`ValidationError::InvalidUrl`] when it does not parse as
    /// an absolute URL. No side effects.
    pub fn parse(raw: ResolveRequest) -> Result<Self, ValidationError> {
        let url = raw
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::MissingUrl)?;

        let source_url = Url::parse(url)
            .map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;

        Ok(Self {
            source_url,
            audio_only: raw.audio_only.unwrap_or(false),
            quality: raw.quality.unwrap_or_default(),
            filename_style: raw.filename_style.unwrap_or_default(),
        })
    }
}
