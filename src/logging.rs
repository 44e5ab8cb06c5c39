//! Tracing subscriber setup for the `labcheck` binary

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `LABCHECK_LOG=labcheck=debug`
pub const LOG_ENV: &str = "LABCHECK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr logger filtered by `LABCHECK_LOG`
///
/// Logs go to stderr so the stdout forwarded by `labcheck run` stays exactly
/// what the lab binary printed. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
