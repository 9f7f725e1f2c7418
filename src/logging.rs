//! Logging initialization for the `bento` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `BENTO_LOG` environment variable. Falls back to the configured
//! `[log] level` when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info by default)
//! bento resolve layout.json
//!
//! # Show every resolver move
//! BENTO_LOG=debug bento resolve layout.json
//!
//! # Module-specific filtering
//! BENTO_LOG=bento_grid::grid=debug,warn bento check layout.json
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "BENTO_LOG";

/// Builds the filter: `BENTO_LOG` if it parses, otherwise `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_str()))
}

/// Initialize the tracing subscriber.
///
/// Output goes to stderr so stdout stays clean for command output.
/// Does nothing if a global subscriber is already set.
pub fn init(fallback: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
