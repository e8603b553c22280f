//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → OtlpFileExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/cipherdeck/cipherdeck-otlp.json`
//! (`/host/...` inside the sandbox), one OTLP document per line. The file
//! rotates at 10 MB and three backups are kept.
//!
//! The span that sends a request to the cipher service is carried across the
//! round trip in the request context map, so the reply handling shows up as
//! its child (see [`crate::service::TraceContext`]).
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: `SpanExporter` and tracer provider
//! - [`otlp`]: OTLP/JSON encoding
//! - [`rotating_file`]: size-based rotation

mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use init::{init_tracing, TRACE_FILE_NAME};
