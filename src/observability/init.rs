//! Tracing subscriber setup.

use super::exporter::create_tracer_provider;
use super::sink::RollingFile;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported on every exported batch.
pub const SERVICE_NAME: &str = "zgallery";

/// Span file name inside the data directory.
pub const SPAN_FILE: &str = "zgallery-spans.jsonl";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Best-effort: if the data directory cannot be created the plugin runs
/// without tracing. Calling it again after a subscriber is installed does
/// nothing.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let sink = RollingFile::new(data_dir.join(SPAN_FILE));
    let provider = create_tracer_provider(sink, resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
