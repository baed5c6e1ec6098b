//! Stream proxy tests
//!
//! Tests for the SSE pass-through: URL validation, upstream request shape,
//! and verbatim forwarding of the event stream.

use std::io::{self, Cursor};

use relay_compose::config::ComposerConfig;
use relay_compose::proxy::{
    handle_post, pump, ProxyConfig, ResponseBody, Upstream, UpstreamRequest, UpstreamResponse,
};
use serde_json::json;

/// Replies with a fixed event stream and counts calls
struct ScriptedBackend {
    events: &'static [u8],
    calls: usize,
    last: Option<UpstreamRequest>,
}

impl ScriptedBackend {
    fn new(events: &'static [u8]) -> Self {
        Self {
            events,
            calls: 0,
            last: None,
        }
    }
}

impl Upstream for ScriptedBackend {
    fn post(&mut self, request: &UpstreamRequest) -> io::Result<UpstreamResponse> {
        self.calls += 1;
        self.last = Some(request.clone());
        Ok(UpstreamResponse {
            status: 200,
            body: Box::new(Cursor::new(self.events)),
        })
    }
}

fn proxy_config() -> ProxyConfig {
    ProxyConfig::from_config(&ComposerConfig::default())
}

#[test]
fn test_foreign_url_rejected_without_upstream_call() {
    let mut backend = ScriptedBackend::new(b"");
    let body = json!({ "url": "https://attacker.example/collect", "body": { "x": 1 } });

    let response = handle_post(
        &proxy_config(),
        body.to_string().as_bytes(),
        Some("Bearer secret"),
        &mut backend,
    );

    assert_eq!(response.status, 400);
    assert_eq!(
        response.json_body(),
        Some(&json!({ "error": "Invalid URL: must be from API base URL" }))
    );
    assert_eq!(backend.calls, 0);
}

#[test]
fn test_prefix_check_is_literal() {
    // Shares the prefix, so it is allowed
    assert!(proxy_config().allows("http://localhost:8000.evil.example/x"));
    assert!(!proxy_config().allows("http://localhost:800"));
}

#[test]
fn test_revision_stream_forwarded_verbatim() {
    let events: &'static [u8] =
        b"event: delta\ndata: {\"text\":\"Hi\"}\n\nevent: delta\ndata: {\"text\":\"!\"}\n\nevent: done\ndata: {}\n\n";
    let mut backend = ScriptedBackend::new(events);
    let body = json!({
        "url": "http://localhost:8000/threads/42/revise",
        "headers": { "Content-Type": "application/json" },
        "body": { "selected_text": "Hello", "feedback": "make it shorter" },
    });

    let response = handle_post(
        &proxy_config(),
        body.to_string().as_bytes(),
        Some("Bearer token"),
        &mut backend,
    );

    assert_eq!(response.status, 200);
    assert_eq!(response.headers.get("Cache-Control"), Some("no-cache"));
    assert_eq!(response.headers.get("Connection"), Some("keep-alive"));
    assert!(response.is_stream());

    let sent = backend.last.unwrap();
    assert_eq!(UpstreamRequest::METHOD, "POST");
    assert_eq!(sent.headers.get("Accept"), Some("text/event-stream"));
    assert_eq!(sent.headers.get("Authorization"), Some("Bearer token"));
    let sent_body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(sent_body["feedback"], "make it shorter");

    let ResponseBody::Stream(mut upstream) = response.body else {
        panic!("expected a stream body");
    };
    let mut out = Vec::new();
    let forwarded = pump(&mut upstream, &mut out).unwrap();
    assert_eq!(forwarded as usize, events.len());
    assert_eq!(out, events);
}
