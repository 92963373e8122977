//! Normalizes heterogeneous backend payloads into the canonical result set.
//!
//! Backend implementations use inconsistent status vocabularies across
//! versions (`stream`, `redirect`, `tunnel` all mean "one resolvable link")
//! and expose failure detail as `error.message`, `error.code`, a bare `error`
//! string, or `text`. This module is a total function over arbitrary JSON:
//! unmatched shapes fall through to a generic error rather than a parse fault.

use serde_json::Value;

/// Placeholder used when the backend omits a filename.
pub const DEFAULT_FILENAME: &str = "video.mp4";

/// Raw status values that all map to a single-link result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Stream,
    Redirect,
    Tunnel,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Stream => "stream",
            LinkKind::Redirect => "redirect",
            LinkKind::Tunnel => "tunnel",
        }
    }
}

/// The gateway's stable output contract. Exactly one variant is returned to
/// the caller per request.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalResult {
    /// Backend reported a single resolvable link.
    Link {
        kind: LinkKind,
        download_url: String,
        filename: String,
    },
    /// Backend offered multiple quality/format choices, order preserved.
    Picker {
        options: Vec<Value>,
        filename: String,
    },
    /// Backend explicitly declined to resolve the source.
    ResolutionError { message: String },
    /// Every instance and attempt was exhausted.
    GatewayError { message: String },
}

/// Maps a raw backend payload onto [`CanonicalResult`]. Total and idempotent.
pub fn normalize(payload: &Value) -> CanonicalResult {
    match payload.get("status").and_then(Value::as_str) {
        Some("stream") => link(LinkKind::Stream, payload),
        Some("redirect") => link(LinkKind::Redirect, payload),
        Some("tunnel") => link(LinkKind::Tunnel, payload),
        Some("picker") => picker(payload),
        Some("error") => CanonicalResult::ResolutionError {
            message: error_message(payload),
        },
        _ if payload.get("error").is_some() => CanonicalResult::ResolutionError {
            message: error_message(payload),
        },
        _ => CanonicalResult::ResolutionError {
            message: "unrecognized backend response".to_string(),
        },
    }
}

fn link(kind: LinkKind, payload: &Value) -> CanonicalResult {
    match non_empty_str(payload.get("url")) {
        Some(url) => CanonicalResult::Link {
            kind,
            download_url: url.to_string(),
            filename: filename(payload),
        },
        // A link status without a link is a backend fault, not a client one.
        None => CanonicalResult::ResolutionError {
            message: "backend reported a link without a URL".to_string(),
        },
    }
}

fn picker(payload: &Value) -> CanonicalResult {
    let options = payload
        .get("picks")
        .or_else(|| payload.get("picker"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    CanonicalResult::Picker {
        options,
        filename: filename(payload),
    }
}

fn filename(payload: &Value) -> String {
    non_empty_str(payload.get("filename"))
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}

/// Extraction order: `error.message`, then `error.code`, then a bare `error`
/// string, then top-level `text`, then a generic message.
fn error_message(payload: &Value) -> String {
    if let Some(error) = payload.get("error") {
        if let Some(message) = non_empty_str(error.get("message")) {
            return message.to_string();
        }
        if let Some(code) = non_empty_str(error.get("code")) {
            return code.to_string();
        }
        if let Some(message) = non_empty_str(Some(error)) {
            return message.to_string();
        }
    }

    if let Some(text) = non_empty_str(payload.get("text")) {
        return text.to_string();
    }

    "resolution failed".to_string()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stream_redirect_and_tunnel_all_map_to_link() {
        for (status, kind) in [
            ("stream", LinkKind::Stream),
            ("redirect", LinkKind::Redirect),
            ("tunnel", LinkKind::Tunnel),
        ] {
            let payload = json!({
                "status": status,
                "url": "https://cdn.example/x.mp4",
                "filename": "clip.mp4"
            });

            assert_eq!(
                normalize(&payload),
                CanonicalResult::Link {
                    kind,
                    download_url: "https://cdn.example/x.mp4".to_string(),
                    filename: "clip.mp4".to_string(),
                }
            );
        }
    }

    #[test]
    fn link_without_filename_gets_placeholder() {
        let payload = json!({ "status": "stream", "url": "https://cdn.example/x.mp4" });

        let CanonicalResult::Link { filename, .. } = normalize(&payload) else {
            panic!("expected link result");
        };
        assert_eq!(filename, DEFAULT_FILENAME);
    }

    #[test]
    fn link_without_url_degrades_to_resolution_error() {
        let payload = json!({ "status": "stream", "filename": "clip.mp4" });

        assert!(matches!(
            normalize(&payload),
            CanonicalResult::ResolutionError { .. }
        ));
    }

    #[test]
    fn picker_preserves_pick_order() {
        let picks = json!([
            { "url": "https://cdn.example/1080.mp4", "quality": "1080" },
            { "url": "https://cdn.example/720.mp4", "quality": "720" },
        ]);
        let payload = json!({ "status": "picker", "picks": picks });

        let CanonicalResult::Picker { options, .. } = normalize(&payload) else {
            panic!("expected picker result");
        };
        assert_eq!(options, picks.as_array().unwrap().clone());
    }

    #[test]
    fn picker_accepts_legacy_picker_field() {
        let payload = json!({
            "status": "picker",
            "picker": [{ "url": "https://cdn.example/a.mp4" }]
        });

        let CanonicalResult::Picker { options, .. } = normalize(&payload) else {
            panic!("expected picker result");
        };
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn picker_without_options_yields_empty_sequence() {
        let payload = json!({ "status": "picker" });

        assert_eq!(
            normalize(&payload),
            CanonicalResult::Picker {
                options: vec![],
                filename: DEFAULT_FILENAME.to_string(),
            }
        );
    }

    #[test]
    fn error_message_extraction_prefers_message_field() {
        let payload = json!({ "status": "error", "error": { "message": "X", "code": "Y" } });

        assert_eq!(
            normalize(&payload),
            CanonicalResult::ResolutionError {
                message: "X".to_string()
            }
        );
    }

    #[test]
    fn error_message_falls_back_to_code_then_text() {
        let by_code = json!({ "status": "error", "error": { "code": "rate_limited" } });
        assert_eq!(
            normalize(&by_code),
            CanonicalResult::ResolutionError {
                message: "rate_limited".to_string()
            }
        );

        let by_text = json!({ "status": "error", "text": "unsupported service" });
        assert_eq!(
            normalize(&by_text),
            CanonicalResult::ResolutionError {
                message: "unsupported service".to_string()
            }
        );
    }

    #[test]
    fn bare_error_string_is_used_verbatim() {
        let payload = json!({ "error": "nothing to download" });

        assert_eq!(
            normalize(&payload),
            CanonicalResult::ResolutionError {
                message: "nothing to download".to_string()
            }
        );
    }

    #[test]
    fn empty_error_object_yields_generic_message() {
        let payload = json!({ "status": "error", "error": {} });

        assert_eq!(
            normalize(&payload),
            CanonicalResult::ResolutionError {
                message: "resolution failed".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_yields_unrecognized_response() {
        for payload in [json!({ "status": "carousel" }), json!({ "ok": true }), json!(null)] {
            assert_eq!(
                normalize(&payload),
                CanonicalResult::ResolutionError {
                    message: "unrecognized backend response".to_string()
                }
            );
        }
    }

    #[test]
    fn normalize_is_idempotent_over_the_same_payload() {
        let payload = json!({
            "status": "picker",
            "picks": [{ "url": "https://cdn.example/a.mp4" }],
            "filename": "set.mp4"
        });

        assert_eq!(normalize(&payload), normalize(&payload));
    }
}
