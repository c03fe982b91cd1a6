//! OpenTelemetry tracing with span export to a local JSON-lines file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → RollingFile
//! ```
//!
//! The plugin has no network route for telemetry, so finished spans are
//! written to `zgallery-spans.jsonl` in the data directory, one JSON document
//! per exported batch. The file rolls over at 5 MiB and the two newest
//! backups are kept.
//!
//! Verbosity comes from the `trace_level` configuration key (an
//! `EnvFilter` directive, default `info`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: `SpanExporter` that serializes spans with `serde_json`
//! - [`sink`]: Size-capped rolling file

mod exporter;
mod init;
mod sink;

pub use exporter::create_tracer_provider;
pub use init::init_tracing;
pub use sink::RollingFile;
