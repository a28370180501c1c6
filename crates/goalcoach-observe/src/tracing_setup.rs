//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! Logs always go to stderr so `--json` command output on stdout stays
//! machine-readable. The OpenTelemetry stdout exporter prints spans to
//! stdout and cannot be redirected, so `otel` is not combined with JSON
//! command output.
//!
//! ```no_run
//! use goalcoach_observe::{TracingOptions, init_tracing, shutdown_tracing};
//!
//! init_tracing(&TracingOptions { verbosity: 1, ..Default::default() }).unwrap();
//! // ...
//! shutdown_tracing();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::OnceLock;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct TracingOptions {
    /// Count of `-v` flags.
    pub verbosity: u8,
    /// Only errors.
    pub quiet: bool,
    /// One JSON object per log line.
    pub json: bool,
    /// Bridge spans to OpenTelemetry with a stdout exporter. Spans land on
    /// stdout, not stderr.
    pub otel: bool,
}

/// Filter directive for a verbosity level. `RUST_LOG` overrides it.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    match verbosity {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,goalcoach_core=debug,goalcoach_infra=debug,goalcoach_api=debug",
        _ => "trace",
    }
}

fn env_filter(options: &TracingOptions) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(options.verbosity, options.quiet)))
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = if options.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    let env_filter = env_filter(options);

    if options.otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("goalcoach");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Flush pending spans and shut down the OpenTelemetry tracer provider.
///
/// No-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
