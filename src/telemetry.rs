//! Analytics events
//!
//! Product events (formatting applied, AI revision requested, API calls) are
//! emitted as structured `tracing` events under the `analytics` target, so a
//! subscriber layer can ship them to an analytics vendor.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{json, Map, Value};

/// A single analytics event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl LogEvent {
    pub fn new(event: impl Into<String>, properties: Option<Value>) -> Self {
        Self {
            event: event.into(),
            properties,
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Emit an analytics event and return it
pub fn log_event(event: &str, properties: Option<Value>) -> LogEvent {
    let record = LogEvent::new(event, properties);
    let payload = serde_json::to_string(&record).unwrap_or_default();
    tracing::info!(target: "analytics", event = %record.event, %payload, "analytics event");
    record
}

fn emit_error(record: &LogEvent) {
    let payload = serde_json::to_string(record).unwrap_or_default();
    tracing::error!(target: "analytics", event = %record.event, %payload, "analytics event");
}

/// `user_action` event; `properties` must be a JSON object or absent
pub fn log_user_action(action: &str, properties: Option<Value>) -> LogEvent {
    let mut merged = Map::new();
    merged.insert("action".to_string(), Value::String(action.to_string()));
    if let Some(Value::Object(extra)) = properties {
        merged.extend(extra);
    }
    log_event("user_action", Some(Value::Object(merged)))
}

/// `error` event with the error chain and optional context
pub fn log_error(error: &anyhow::Error, context: Option<Value>) -> LogEvent {
    let chain: Vec<String> = error.chain().map(|cause| cause.to_string()).collect();
    let record = LogEvent::new(
        "error",
        Some(json!({
            "message": error.to_string(),
            "chain": chain,
            "context": context,
        })),
    );
    emit_error(&record);
    record
}

/// `api_call` event
pub fn log_api_call(endpoint: &str, method: &str, status: u16, duration_ms: Option<u64>) -> LogEvent {
    log_event(
        "api_call",
        Some(json!({
            "endpoint": endpoint,
            "method": method,
            "status": status,
            "duration": duration_ms,
        })),
    )
}

/// Run `f` under a subscriber that records every event and return the
/// formatted output
#[cfg(test)]
pub(crate) fn capture_events(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let sink = Sink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
