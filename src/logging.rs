//! Diagnostic logging
//!
//! Logs go to stderr so stdout stays reserved for build output (and NDJSON
//! under `--json`). `DOCWATCH_LOG` takes a full `EnvFilter` directive and
//! overrides the `-v` count.

use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "DOCWATCH_LOG";

/// Level for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("docwatch={}", level_for(verbosity))));

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
