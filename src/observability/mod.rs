//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! Traces go to `~/.local/share/zellij/reposcope/reposcope-otlp.json` on the
//! host, rotated at 10 MB with three backups. The filter comes from the
//! `trace_level` configuration key (default `info`).
//!
//! Search responses arrive as separate host events, so the issuing span's
//! context is carried through the request ([`TraceContext`]) and re-attached
//! when the response is handled.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider and file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating line writer
//! - `context`: trace context propagation

mod context;
mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use context::TraceContext;
pub use init::{init_tracing, init_tracing_to, SERVICE_NAME};
