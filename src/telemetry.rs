//! Logging setup for the binary
//!
//! The library only emits `tracing` events; this installs the subscriber that
//! prints them. Output goes to stderr so it never mixes with the game board.

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `mastermind=debug`
pub const LOG_ENV_VAR: &str = "MASTERMIND_LOG";

/// Install the global subscriber
///
/// `verbosity` is the number of `-v` flags and sets the default level;
/// `MASTERMIND_LOG` overrides it. Calling this twice is harmless: the second
/// install is ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Map a `-v` count to a level
#[must_use]
pub const fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
