use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "MUSTER_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber, writing to stderr so command output on stdout stays clean.
/// The filter comes from `MUSTER_LOG` (e.g. `debug`, `muster=trace`), defaulting to `info`.
/// Calling it twice is harmless; the second install is ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
