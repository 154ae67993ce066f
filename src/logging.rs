//! Logging setup for the `wordnav` binary.
//!
//! Logs are written to stderr so they never mix with command output.
//!
//! ## Environment Variables
//!
//! 1. **`WORDNAV_LOG`** (highest priority): a bare level such as `debug` applies to
//!    this crate only; anything containing `=`, `:` or `,` is used as a full filter
//! 2. **`RUST_LOG`**: standard tracing filter
//! 3. **Default**: `warn` globally, `info` for `wordnav`

use std::env;

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn,wordnav=info";

/// Initialize logging.
///
/// `verbose` raises this crate to `debug` when no environment variable is set.
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let filter = create_filter(verbose);
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_filter(verbose: bool) -> EnvFilter {
    if let Ok(wordnav_log) = env::var("WORDNAV_LOG") {
        return EnvFilter::new(expand_wordnav_log(&wordnav_log));
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    if verbose {
        EnvFilter::new("warn,wordnav=debug")
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    }
}

/// Expand a bare `WORDNAV_LOG` level into a filter scoped to this crate
fn expand_wordnav_log(value: &str) -> String {
    if value.contains('=') || value.contains(':') || value.contains(',') {
        return value.to_string();
    }
    format!("warn,wordnav={value}")
}
