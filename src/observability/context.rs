//! Trace context propagation across the asynchronous web request boundary.
//!
//! The host delivers a search response as a separate event, long after the
//! span that issued the request has closed. The issuing span's IDs travel in
//! the request context map and are re-attached when the response arrives, so
//! both halves of a fetch land in the same trace.

use serde::{Deserialize, Serialize};

/// OpenTelemetry trace and span IDs captured from the current span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace ID as a 32-character hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a 16-character hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the IDs of the active span.
    ///
    /// Returns `None` when tracing is not initialized or the span is not
    /// sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Builds an OpenTelemetry context whose remote parent is the issuing
    /// span, for use with `OpenTelemetrySpanExt::set_parent`.
    ///
    /// Returns `None` if either ID fails to parse.
    #[must_use]
    pub fn to_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_without_subscriber() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn rejects_invalid_ids() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.to_context().is_none());
    }

    #[test]
    fn accepts_valid_ids() {
        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.to_context().is_some());
    }
}
