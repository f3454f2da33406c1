// Tracing setup
//
// `RUST_LOG` wins when set; otherwise the configured level is used, or
// `debug` when `debug = true`.

use anyhow::Result;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter directive derived from config alone
pub fn filter_directive(config: &LoggingConfig) -> String {
    if config.debug {
        "debug".to_string()
    } else if config.level.trim().is_empty() {
        "info".to_string()
    } else {
        config.level.clone()
    }
}

/// Install the global fmt subscriber, writing to stderr.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {}", e))
}

/// Run `f` with a thread-local stderr subscriber (`RUST_LOG`, else `warn`).
///
/// Covers config loading, which happens before `init_tracing` can run.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    with_scoped_subscriber(filter, std::io::stderr, f)
}

pub(crate) fn with_scoped_subscriber<W, T>(filter: EnvFilter, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}
