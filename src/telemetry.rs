//! Tracing/logging initialization.

use tracing_subscriber::{EnvFilter, fmt};

use seathub_core::config::logging::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Call once at
/// startup; a second call is a no-op error from the subscriber and is
/// ignored here so tests can share a process.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        _ => fmt().pretty().with_env_filter(filter).with_target(true).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("logging already initialized: {e}");
    }
}
