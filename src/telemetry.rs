//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// [`Config::log_level`]. `LOG_FORMAT=json` selects JSON lines.
///
/// # Errors
///
/// Returns an error if the log level is not a valid filter directive or a
/// global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level '{}'", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
