//! Single-attempt HTTP execution with outcome classification.
//!
//! The executor issues exactly one POST per call and never raises past its
//! boundary: every transport failure, bad status, or malformed body becomes an
//! [`AttemptOutcome`] variant, so the orchestrator's control flow is a plain
//! match over a closed set.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::builder::OutboundRequest;

/// Maximum bytes of an upstream error body kept for diagnostics.
const BODY_SNIPPET_LIMIT: usize = 256;

/// Classified result of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// 2xx response with a parseable JSON body.
    Success(Value),
    /// The per-attempt deadline elapsed; the in-flight call was abandoned.
    Timeout,
    /// Non-2xx status; carries a truncated body for diagnostics.
    HttpError { status: u16, body_snippet: String },
    /// DNS, connect, TLS, or other transport-level failure.
    NetworkError(String),
    /// 2xx response whose body was not valid JSON.
    ParseError(String),
}

impl AttemptOutcome {
    /// Short stable label for logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::Timeout => "timeout",
            AttemptOutcome::HttpError { .. } => "http_error",
            AttemptOutcome::NetworkError(_) => "network_error",
            AttemptOutcome::ParseError(_) => "parse_error",
        }
    }

    /// Human-readable diagnostic detail, empty for success.
    pub fn detail(&self) -> String {
        match self {
            AttemptOutcome::Success(_) => String::new(),
            AttemptOutcome::Timeout => "deadline exceeded".to_string(),
            AttemptOutcome::HttpError {
                status,
                body_snippet,
            } => format!("HTTP {status}: {body_snippet}"),
            AttemptOutcome::NetworkError(reason) => reason.clone(),
            AttemptOutcome::ParseError(reason) => reason.clone(),
        }
    }
}

/// One backend call with a hard deadline. Implemented by [`HttpExecutor`] in
/// production and by scripted doubles in orchestrator tests.
#[async_trait]
pub trait AttemptExecutor: Send + Sync {
    async fn execute(&self, request: &OutboundRequest, timeout: Duration) -> AttemptOutcome;
}

/// Production executor backed by a shared reqwest client. The client's
/// connection pool is reused across requests; it holds no per-request state.
pub struct HttpExecutor {
    client: reqwest::Client,
}

impl HttpExecutor {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("linkgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    async fn execute_once(&self, request: &OutboundRequest) -> AttemptOutcome {
        debug!(endpoint = %request.endpoint, "sending backend request");

        let mut call = self.client.post(request.endpoint.clone());
        for (name, value) in &request.headers {
            call = call.header(name, value);
        }

        let response = match call.json(&request.body).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return AttemptOutcome::Timeout,
            Err(e) => return AttemptOutcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return AttemptOutcome::Timeout,
            Err(e) => return AttemptOutcome::NetworkError(e.to_string()),
        };

        if !status.is_success() {
            return AttemptOutcome::HttpError {
                status: status.as_u16(),
                body_snippet: truncate_snippet(&body),
            };
        }

        match serde_json::from_str(&body) {
            Ok(payload) => AttemptOutcome::Success(payload),
            Err(e) => AttemptOutcome::ParseError(e.to_string()),
        }
    }
}

#[async_trait]
impl AttemptExecutor for HttpExecutor {
    async fn execute(&self, request: &OutboundRequest, timeout: Duration) -> AttemptOutcome {
        match tokio::time::timeout(timeout, self.execute_once(request)).await {
            Ok(outcome) => outcome,
            Err(_) => AttemptOutcome::Timeout,
        }
    }
}

fn truncate_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_LIMIT {
        return body.to_string();
    }

    let mut end = BODY_SNIPPET_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_bodies_whole() {
        assert_eq!(truncate_snippet("upstream said no"), "upstream said no");
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(BODY_SNIPPET_LIMIT * 4);
        assert_eq!(truncate_snippet(&body).len(), BODY_SNIPPET_LIMIT);
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let body = "é".repeat(BODY_SNIPPET_LIMIT);
        let snippet = truncate_snippet(&body);
        assert!(snippet.len() <= BODY_SNIPPET_LIMIT);
        assert!(body.starts_with(&snippet));
    }

    #[test]
    fn outcome_kinds_are_stable() {
        assert_eq!(AttemptOutcome::Timeout.kind(), "timeout");
        assert_eq!(
            AttemptOutcome::HttpError {
                status: 503,
                body_snippet: "busy".to_string()
            }
            .detail(),
            "HTTP 503: busy"
        );
    }
}
