//! Log output for the CLI
//!
//! Everything goes to stderr so stdout carries only command output.
//! `RUST_LOG` wins over the verbosity flag when set.

use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity level (number of `-v` flags)
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
