//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Level used when neither `RUST_LOG` nor `-v` says otherwise
pub const DEFAULT_LEVEL: &str = "info";

/// Each `-v` raises the configured level one step: debug, then trace
pub fn effective_level(configured: &str, verbosity: u8) -> &str {
    match verbosity {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`/`verbosity`.
///
/// Logs go to stderr; stdout is kept for the options table and dry-run output.
pub fn init_logging(level: &str, verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(level, verbosity)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
