//! Logging initialization for the CLI and job entry points.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Quiet mode (the default CLI behavior) shows warnings and errors only;
/// verbose mode shows the full structured event stream. `RUST_LOG`
/// overrides both. Logs go to stderr so stdout stays machine-readable.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
