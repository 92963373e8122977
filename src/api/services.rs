use axum::{Json, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, response::Response};
use http_body_util::BodyExt;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::models::{DeclinedResponse, HealthResponse, LinkResponse, PickerResponse};
use super::state::AppState;
use crate::api::error::ApiError;
use crate::gateway::{CanonicalRequest, CanonicalResult, ResolveRequest};

/// Media-link resolution endpoint (POST /api/download)
///
/// Accepts `{ "url": string, "audioOnly"?, "quality"?, "filenameStyle"? }` and
/// resolves the source URL through the configured backend instances.
///
/// ## Flow:
/// 1. Validate Content-Type and body size
/// 2. Parse the body into a canonical request (400 on missing/invalid URL)
/// 3. Run the gateway's retry/failover loop
/// 4. Map the canonical result onto the wire contract:
///    - link / picker → 200 with `success: true`
///    - backend declined → 200 with `success: false` (the gateway worked,
///      the resolution did not)
///    - every instance exhausted → 502
pub async fn resolve(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<Response, ApiError> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::InvalidPayload("missing Content-Type header".into()))?;

    super::utils::parse_content_type(content_type)?;

    let body_bytes = read_body(body, state.config.server.max_body_bytes).await?;

    let raw: ResolveRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    // Validation failures never reach the network; reject before any
    // backend instance is contacted.
    let request = match CanonicalRequest::parse(raw) {
        Ok(request) => request,
        Err(e) => {
            state.metrics.request_rejected();
            return Err(e.into());
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("resolve", %request_id, source_url = %request.source_url);
    let result = state.gateway.resolve(&request).instrument(span).await;

    let response = match result {
        CanonicalResult::Link {
            kind,
            download_url,
            filename,
        } => {
            state.metrics.resolve_succeeded();
            info!(%request_id, kind = kind.as_str(), "resolved link");
            (
                StatusCode::OK,
                Json(LinkResponse {
                    success: true,
                    kind: kind.as_str().to_string(),
                    url: download_url,
                    filename,
                }),
            )
                .into_response()
        }
        CanonicalResult::Picker { options, filename } => {
            state.metrics.resolve_succeeded();
            info!(%request_id, picks = options.len(), "resolved picker");
            (
                StatusCode::OK,
                Json(PickerResponse {
                    success: true,
                    kind: "picker".to_string(),
                    picks: options,
                    filename,
                }),
            )
                .into_response()
        }
        CanonicalResult::ResolutionError { message } => {
            state.metrics.resolve_declined();
            info!(%request_id, "backend declined resolution");
            (
                StatusCode::OK,
                Json(DeclinedResponse {
                    success: false,
                    error: message,
                }),
            )
                .into_response()
        }
        CanonicalResult::GatewayError { message } => {
            state.metrics.resolve_exhausted();
            return Err(ApiError::BadGateway(message));
        }
    };

    Ok(response)
}

/// CORS preflight for the resolution endpoint (OPTIONS /api/download)
///
/// Returns 200 with no body; the CORS middleware attaches the permissive
/// access-control headers.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

/// Reads request body and validates size
async fn read_body(body: axum::body::Body, max_size: usize) -> Result<Vec<u8>, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .to_bytes()
        .to_vec();

    super::utils::validate_body_size(&data, max_size)?;

    Ok(data)
}

/// Health check endpoint (GET /health)
///
/// Reports the API itself, the resolver registry (unconfigured when empty),
/// and a snapshot of the resolution counters.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());

    let registry_status = if state.gateway.registry().is_empty() {
        "unconfigured"
    } else {
        "healthy"
    };
    components.insert("registry".to_string(), registry_status.to_string());

    let all_healthy = components.values().all(|status| status == "healthy");
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.metrics.snapshot(),
    };

    (status_code, Json(response))
}
