//! Logging setup for the Scrub CLI
//!
//! Maps `-v` counts onto a tracing-subscriber `EnvFilter`; `log` records
//! from scrub-core are picked up through the subscriber's log bridge.
//! An explicit `RUST_LOG` wins over the flag-derived level.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber for the given verbosity level.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
