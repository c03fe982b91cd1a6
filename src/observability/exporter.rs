//! OpenTelemetry span exporter writing JSON lines through a [`RollingFile`].
//!
//! Each exported batch becomes one line:
//!
//! ```json
//! {"resource":{"service.name":"zgallery"},
//!  "spans":[{"traceId":"…","spanId":"…","parentSpanId":null,"name":"handle_event",
//!            "kind":"internal","start":"2026-10-16T09:12:03.120345Z","durationMicros":412,
//!            "attributes":{"event":"SubmitQuery"},"events":[],"status":"unset"}]}
//! ```

use super::sink::RollingFile;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use serde_json::{json, Map, Value as JsonValue};
use std::time::SystemTime;

/// Span exporter backed by a local file.
#[derive(Debug)]
struct FileSpanExporter {
    sink: RollingFile,
    resource: JsonValue,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn new(sink: RollingFile, resource: &Resource) -> Self {
        Self {
            sink,
            resource: resource_json(resource),
            is_shutdown: false,
        }
    }

    fn batch_json(&self, batch: &[SpanData]) -> JsonValue {
        json!({
            "resource": self.resource,
            "spans": batch.iter().map(span_json).collect::<Vec<_>>(),
        })
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "span exporter is shut down",
            ))));
        }

        let line = self.batch_json(&batch).to_string();
        let result = self
            .sink
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource_json(resource);
    }
}

/// Builds a tracer provider exporting every finished span to `sink`.
///
/// Uses the simple (synchronous) processor: the plugin is single-threaded
/// and has no runtime to drive a batch processor.
#[must_use]
pub fn create_tracer_provider(sink: RollingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(sink, &resource);

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn resource_json(resource: &Resource) -> JsonValue {
    let attributes: Map<String, JsonValue> = resource
        .iter()
        .map(|(key, value)| (key.to_string(), value_json(value)))
        .collect();
    JsonValue::Object(attributes)
}

fn span_json(span: &SpanData) -> JsonValue {
    let parent = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
    let duration_micros = span
        .end_time
        .duration_since(span.start_time)
        .unwrap_or_default()
        .as_micros();

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "time": timestamp(event.timestamp),
                "attributes": attributes_json(&event.attributes),
            })
        })
        .collect();

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_name(&span.span_kind),
        "start": timestamp(span.start_time),
        "durationMicros": u64::try_from(duration_micros).unwrap_or(u64::MAX),
        "attributes": attributes_json(&span.attributes),
        "events": events,
        "status": status_json(&span.status),
    })
}

fn attributes_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_json(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

const fn kind_name(kind: &SpanKind) -> &'static str {
    match kind {
        SpanKind::Internal => "internal",
        SpanKind::Server => "server",
        SpanKind::Client => "client",
        SpanKind::Producer => "producer",
        SpanKind::Consumer => "consumer",
    }
}

fn status_json(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}
