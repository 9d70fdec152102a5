//! Diagnostic logging setup.
//!
//! Log lines go to stderr so stdout stays clean for command output and JSON.
//!
//! The level is controlled by the `IMGMETA_LOG` environment variable:
//! - `IMGMETA_LOG=debug` shows every exiftool invocation
//! - `IMGMETA_LOG=info` adds batch summaries
//! - `IMGMETA_LOG=warn` for per-file failures only (default)

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "IMGMETA_LOG";

const DEFAULT_LEVEL: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize the global subscriber. Calling it again is a no-op.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
