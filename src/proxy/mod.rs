//! Server-sent events pass-through to the Relay backend
//!
//! The proxy accepts `POST {url, headers, body}`, checks that `url` belongs to
//! the configured API base, re-issues the request upstream asking for
//! `text/event-stream`, and streams the upstream bytes back unchanged.
//!
//! Transport is abstracted behind [`Upstream`]; the host wires it to its HTTP
//! client and copies [`ResponseBody::Stream`] to the caller with [`pump`].

mod headers;
mod stream;

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::time::Instant;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ComposerConfig;
use crate::telemetry;

pub use headers::HeaderList;
pub use stream::pump;

pub const INVALID_URL_ERROR: &str = "Invalid URL: must be from API base URL";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Body of a proxy call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProxyRequest {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
}

/// Which backend the proxy may reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub api_base_url: String,
}

impl ProxyConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    pub fn from_config(config: &ComposerConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Plain prefix check against the API base
    pub fn allows(&self, url: &str) -> bool {
        url.starts_with(&self.api_base_url)
    }
}

/// Request the proxy sends upstream. Always a `POST`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: HeaderList,
    /// JSON-serialized body, if the caller supplied one
    pub body: Option<String>,
}

impl UpstreamRequest {
    pub const METHOD: &'static str = "POST";
}

/// Status and body stream of an upstream reply
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP client the proxy forwards through
pub trait Upstream {
    /// Send the request; `Err` means the transport itself failed
    fn post(&mut self, request: &UpstreamRequest) -> io::Result<UpstreamResponse>;
}

pub enum ResponseBody {
    Empty,
    Json(Value),
    /// Upstream bytes to forward verbatim
    Stream(Box<dyn Read + Send>),
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Empty => write!(f, "Empty"),
            ResponseBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ResponseBody::Stream(_) => write!(f, "Stream(..)"),
        }
    }
}

/// What the proxy answers its caller
#[derive(Debug)]
pub struct ProxyResponse {
    pub status: u16,
    pub headers: HeaderList,
    pub body: ResponseBody,
}

impl ProxyResponse {
    fn json(status: u16, value: Value) -> Self {
        let mut headers = HeaderList::new();
        headers.set("Content-Type", "application/json");
        Self {
            status,
            headers,
            body: ResponseBody::Json(value),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }

    /// JSON payload, for non-streaming responses
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.body, ResponseBody::Stream(_))
    }
}

/// Build the upstream request from the caller's request.
///
/// Header precedence, lowest first: SSE defaults, caller headers, the
/// incoming `Authorization`.
pub fn upstream_request(request: ProxyRequest, authorization: Option<&str>) -> UpstreamRequest {
    let mut headers = HeaderList::new();
    headers.set("Accept", "text/event-stream");
    headers.set("Cache-Control", "no-cache");
    for (name, value) in &request.headers {
        headers.set(name, value);
    }
    if let Some(auth) = authorization {
        headers.set("Authorization", auth);
    }

    let body = request
        .body
        .as_ref()
        .filter(|value| is_truthy(value))
        .map(Value::to_string);

    UpstreamRequest {
        url: request.url,
        headers,
        body,
    }
}

/// JavaScript truthiness of a JSON value; falsy bodies are not sent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Handle `POST` on the stream endpoint
pub fn handle_post(
    config: &ProxyConfig,
    raw_body: &[u8],
    authorization: Option<&str>,
    upstream: &mut dyn Upstream,
) -> ProxyResponse {
    let request: ProxyRequest = match serde_json::from_slice(raw_body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Stream proxy error: {}", e);
            return ProxyResponse::error(500, INTERNAL_ERROR);
        }
    };

    if !config.allows(&request.url) {
        tracing::info!(url = %request.url, base = %config.api_base_url, "rejected proxy target");
        return ProxyResponse::error(400, INVALID_URL_ERROR);
    }

    let outgoing = upstream_request(request, authorization);
    let started = Instant::now();
    let reply = match upstream.post(&outgoing) {
        Ok(reply) => {
            telemetry::log_api_call(
                &outgoing.url,
                UpstreamRequest::METHOD,
                reply.status,
                Some(started.elapsed().as_millis() as u64),
            );
            reply
        }
        Err(e) => {
            tracing::error!(url = %outgoing.url, "Stream proxy error: {}", e);
            return ProxyResponse::error(500, INTERNAL_ERROR);
        }
    };

    if !reply.is_success() {
        tracing::warn!(url = %outgoing.url, status = reply.status, "backend request failed");
        return ProxyResponse::error(
            reply.status,
            format!("Backend request failed: {}", reply.status),
        );
    }

    tracing::info!(url = %outgoing.url, "streaming backend response");
    let mut headers = HeaderList::new();
    headers.set("Content-Type", "text/event-stream");
    headers.set("Cache-Control", "no-cache");
    headers.set("Connection", "keep-alive");
    headers.set("Access-Control-Allow-Origin", "*");
    headers.set("Access-Control-Allow-Methods", "POST");
    headers.set("Access-Control-Allow-Headers", "Content-Type, Authorization");

    ProxyResponse {
        status: 200,
        headers,
        body: ResponseBody::Stream(reply.body),
    }
}

/// Handle `OPTIONS` (CORS preflight)
pub fn options_response() -> ProxyResponse {
    let mut headers = HeaderList::new();
    headers.set("Access-Control-Allow-Origin", "*");
    headers.set("Access-Control-Allow-Methods", "POST, OPTIONS");
    headers.set("Access-Control-Allow-Headers", "Content-Type, Authorization");
    ProxyResponse {
        status: 200,
        headers,
        body: ResponseBody::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Records the request and replies with a canned status and body
    struct FakeUpstream {
        status: u16,
        body: &'static [u8],
        fail: bool,
        seen: Option<UpstreamRequest>,
    }

    impl FakeUpstream {
        fn replying(status: u16, body: &'static [u8]) -> Self {
            Self {
                status,
                body,
                fail: false,
                seen: None,
            }
        }
    }

    impl Upstream for FakeUpstream {
        fn post(&mut self, request: &UpstreamRequest) -> io::Result<UpstreamResponse> {
            self.seen = Some(request.clone());
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
            }
            Ok(UpstreamResponse {
                status: self.status,
                body: Box::new(Cursor::new(self.body)),
            })
        }
    }

    fn config() -> ProxyConfig {
        ProxyConfig::new("http://localhost:8000")
    }

    #[test]
    fn test_rejects_foreign_url() {
        let mut upstream = FakeUpstream::replying(200, b"");
        let body = br#"{"url": "https://evil.example/steal"}"#;
        let response = handle_post(&config(), body, None, &mut upstream);

        assert_eq!(response.status, 400);
        assert_eq!(
            response.json_body(),
            Some(&json!({ "error": "Invalid URL: must be from API base URL" }))
        );
        assert!(upstream.seen.is_none());
    }

    #[test]
    fn test_streams_on_success() {
        let mut upstream = FakeUpstream::replying(200, b"data: hi\n\n");
        let body = br#"{"url": "http://localhost:8000/threads/1/stream"}"#;
        let response = handle_post(&config(), body, None, &mut upstream);

        assert_eq!(response.status, 200);
        assert_eq!(response.headers.get("content-type"), Some("text/event-stream"));
        let ResponseBody::Stream(mut reader) = response.body else {
            panic!("expected stream body");
        };
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"data: hi\n\n");
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let mut upstream = FakeUpstream::replying(503, b"");
        let body = br#"{"url": "http://localhost:8000/x"}"#;
        let response = handle_post(&config(), body, None, &mut upstream);

        assert_eq!(response.status, 503);
        assert_eq!(
            response.json_body(),
            Some(&json!({ "error": "Backend request failed: 503" }))
        );
    }

    #[test]
    fn test_transport_failure_is_internal_error() {
        let mut upstream = FakeUpstream::replying(200, b"");
        upstream.fail = true;
        let body = br#"{"url": "http://localhost:8000/x"}"#;
        let response = handle_post(&config(), body, None, &mut upstream);
        assert_eq!(response.status, 500);
        assert_eq!(response.json_body(), Some(&json!({ "error": INTERNAL_ERROR })));
    }

    #[test]
    fn test_malformed_body_is_internal_error() {
        let mut upstream = FakeUpstream::replying(200, b"");
        let bodies: [&[u8]; 2] = [b"not json", br#"{"headers": {}}"#];
        for body in bodies {
            let response = handle_post(&config(), body, None, &mut upstream);
            assert_eq!(response.status, 500);
        }
    }

    #[test]
    fn test_header_precedence() {
        let mut upstream = FakeUpstream::replying(200, b"");
        let body = br#"{
            "url": "http://localhost:8000/x",
            "headers": {"accept": "application/json", "X-Trace": "abc", "Authorization": "Bearer caller"},
            "body": {"q": 1}
        }"#;
        handle_post(&config(), body, Some("Bearer incoming"), &mut upstream);

        let seen = upstream.seen.unwrap();
        assert_eq!(seen.headers.get("Accept"), Some("application/json"));
        assert_eq!(seen.headers.get("Cache-Control"), Some("no-cache"));
        assert_eq!(seen.headers.get("x-trace"), Some("abc"));
        assert_eq!(seen.headers.get("authorization"), Some("Bearer incoming"));
        assert_eq!(seen.body.as_deref(), Some(r#"{"q":1}"#));
    }

    #[test]
    fn test_falsy_body_not_sent() {
        let bodies: [&[u8]; 4] = [
            br#"{"url": "http://localhost:8000/x", "body": null}"#,
            br#"{"url": "http://localhost:8000/x", "body": ""}"#,
            br#"{"url": "http://localhost:8000/x", "body": 0}"#,
            br#"{"url": "http://localhost:8000/x"}"#,
        ];
        for raw in bodies {
            let mut upstream = FakeUpstream::replying(200, b"");
            handle_post(&config(), raw, None, &mut upstream);
            assert_eq!(upstream.seen.unwrap().body, None);
        }
    }

    #[test]
    fn test_upstream_reply_logged_as_api_call() {
        let mut upstream = FakeUpstream::replying(503, b"");
        let body = br#"{"url": "http://localhost:8000/threads/7/stream"}"#;
        let output = crate::telemetry::capture_events(|| {
            handle_post(&config(), body, None, &mut upstream);
        });

        assert!(output.contains(r#""event":"api_call""#), "{}", output);
        assert!(
            output.contains(r#""endpoint":"http://localhost:8000/threads/7/stream""#),
            "{}",
            output
        );
        assert!(output.contains(r#""method":"POST""#), "{}", output);
        assert!(output.contains(r#""status":503"#), "{}", output);
    }

    #[test]
    fn test_rejected_url_not_logged_as_api_call() {
        let mut upstream = FakeUpstream::replying(200, b"");
        let body = br#"{"url": "https://evil.example/x"}"#;
        let output = crate::telemetry::capture_events(|| {
            handle_post(&config(), body, None, &mut upstream);
        });
        assert!(!output.contains("api_call"), "{}", output);
    }

    #[test]
    fn test_options_preflight() {
        let response = options_response();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Methods"),
            Some("POST, OPTIONS")
        );
        assert!(matches!(response.body, ResponseBody::Empty));
    }
}
