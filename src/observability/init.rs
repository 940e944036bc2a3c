//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookdesk-otlp.jsonl";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `<data dir>/bookdesk-otlp.jsonl`.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs untraced, and an invalid filter directive falls back to
/// `info`. Only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "bookdesk"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("bookdesk"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
