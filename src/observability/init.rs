//! Tracing subscriber setup.

use super::tracer;
use crate::domain::{ReposcopeError, Result};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` resource attribute and instrumentation scope name.
pub const SERVICE_NAME: &str = "reposcope";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to the
/// rotating trace file under the plugin data directory.
///
/// # Errors
///
/// - [`ReposcopeError::Io`] if the data directory cannot be created
/// - [`ReposcopeError::Config`] if `trace_level` is not a valid filter
///   directive, or a global subscriber is already installed
pub fn init_tracing(config: &Config) -> Result<()> {
    init_tracing_to(config, &crate::infrastructure::trace_file_path())
}

/// [`init_tracing`] with an explicit trace file location.
///
/// # Errors
///
/// Same as [`init_tracing`].
pub fn init_tracing_to(config: &Config, trace_file: &Path) -> Result<()> {
    let filter = EnvFilter::try_new(&config.trace_level).map_err(|e| {
        ReposcopeError::Config(format!("invalid trace_level {:?}: {e}", config.trace_level))
    })?;

    if let Some(dir) = trace_file.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(trace_file.to_path_buf(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ReposcopeError::Config(format!("tracing already initialized: {e}")))
}
