use anyhow::{Context, Result};
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    runtime::Tokio,
    trace::{Tracer, TracerProvider},
    Resource,
};
use std::{env, sync::OnceLock, time::Duration};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};
use ulid::Ulid;

const OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

static TRACER_PROVIDER: OnceLock<TracerProvider> = OnceLock::new();

/// gRPC exporters need a scheme; bare `host:port` is taken as https.
fn otlp_endpoint(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw.trim_end_matches('/'))
    }
}

fn otlp_tracer(endpoint: &str) -> Result<Tracer> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_endpoint(endpoint))
        .with_timeout(Duration::from_secs(3))
        .build()
        .context("Failed to build OTLP span exporter")?;

    let instance_id =
        env::var("OTEL_SERVICE_INSTANCE_ID").unwrap_or_else(|_| Ulid::new().to_string());

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_resource(Resource::new([
            KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("service.instance.id", instance_id),
        ]))
        .build();

    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TraceContextPropagator::new());

    let tracer = provider.tracer(env!("CARGO_PKG_NAME"));
    let _ = TRACER_PROVIDER.set(provider);

    Ok(tracer)
}

/// `RUST_LOG` wins over `level`; noisy dependencies are capped either way.
fn env_filter(level: Level) -> Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    for directive in ["hyper=error", "tokio=error", "sqlx=warn", "opentelemetry_sdk=warn"] {
        filter = filter.add_directive(directive.parse()?);
    }

    Ok(filter)
}

/// Install the global subscriber: pretty or JSON lines on stdout, plus OTLP
/// export when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built or a subscriber is
/// already installed.
pub fn init(verbosity_level: Option<Level>, json: bool) -> Result<()> {
    let fmt_layer = if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(false)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed()
    };

    let otel_layer = match env::var(OTLP_ENDPOINT) {
        Ok(endpoint) => Some(tracing_opentelemetry::layer().with_tracer(otlp_tracer(&endpoint)?)),
        Err(_) => None,
    };

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(otel_layer)
        .with(env_filter(verbosity_level.unwrap_or(Level::ERROR))?);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

/// Flush and stop the OTLP exporter, if one was started.
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        if let Err(err) = provider.shutdown() {
            debug!("tracer provider shutdown failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_with_scheme_is_kept() {
        assert_eq!(otlp_endpoint("http://localhost:4317"), "http://localhost:4317");
        assert_eq!(otlp_endpoint("https://collector:4317"), "https://collector:4317");
    }

    #[test]
    fn bare_endpoint_defaults_to_https() {
        assert_eq!(otlp_endpoint("localhost:4317"), "https://localhost:4317");
        assert_eq!(otlp_endpoint("collector.internal:4317/"), "https://collector.internal:4317");
    }

    #[test]
    fn filter_builds_without_rust_log() {
        temp_env::with_var("RUST_LOG", None::<&str>, || {
            assert!(env_filter(Level::INFO).is_ok());
        });
    }

    #[test]
    fn shutdown_without_provider_is_a_noop() {
        shutdown_tracer();
    }
}
