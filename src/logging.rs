//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`. The default level is `warn`
//! so the engine's own output is normally all the user sees.

use std::io::IsTerminal;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count. `RUST_LOG` takes precedence.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "guibox=warn",
        1 => "guibox=info",
        2 => "guibox=debug",
        _ => "guibox=trace",
    }
}

pub fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
