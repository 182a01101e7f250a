//! Logging init: structured events on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};

/// Pick the filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Initialize logging to stderr so stdout only carries URLs and the summary.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
