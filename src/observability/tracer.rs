//! Tracer provider whose exporter appends OTLP/JSON lines to a rotating file.
//!
//! Zellij plugins cannot open sockets, so spans are exported synchronously
//! through the simple span processor straight to disk.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

use super::otlp;
use super::rotating_file::RotatingFile;

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        let request = otlp::export_request(&self.resource, batch);
        let line = serde_json::to_string(&request).map_err(|e| TraceError::from(e.to_string()))?;
        self.file
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider exporting every finished span to `file_path`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(RotatingFile::new(file_path), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer as _, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookdesk-otlp.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "bookdesk")]);

        let provider = create_tracer_provider(path.clone(), resource);
        provider.tracer("test").in_span("book_api_request", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let span = &line["resourceSpans"][0]["scopeSpans"][0]["spans"][0];

        assert_eq!(span["name"], "book_api_request");
        assert_eq!(span["traceId"].as_str().map(str::len), Some(32));
    }
}
