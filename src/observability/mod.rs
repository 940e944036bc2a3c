//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → rotating JSONL file
//! ```
//!
//! Traces land in `~/.local/share/zellij/bookdesk/bookdesk-otlp.jsonl`
//! (seen from the sandbox as `/host/...`), one OTLP/JSON export request per
//! line. The file rotates at 10 MB into `.1`, `.2` and `.3` backups.
//!
//! The filter comes from the `trace_level` plugin option, e.g.
//! `trace_level "bookdesk=debug"`, and defaults to `info`.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider and file exporter
//! - [`otlp`]: OTLP/JSON document types
//! - [`rotating_file`]: size-based rotating line writer

mod init;
pub mod otlp;
pub mod rotating_file;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
