//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with the operator text on stdout.
//! The filter is read from `CSVSQL_LOG`, then `RUST_LOG`, defaulting to `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CSVSQL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `CSVSQL_LOG`, falling back to `RUST_LOG`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
