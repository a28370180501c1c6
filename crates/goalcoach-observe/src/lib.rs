//! Observability for goalcoach: subscriber setup, log filtering, and the
//! optional OpenTelemetry span bridge.

pub mod tracing_setup;

pub use tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
