//! Engine configuration loaded from environment variables.
//!
//! Parsing and normalization need no configuration; these settings pick the
//! default rule set, the resolver timeout and logging output for
//! [`crate::application::services::UrlService`] and
//! [`crate::telemetry::init_tracing`].
//!
//! ```bash
//! export URLNORM_DISABLED_RULES="sort-query,decode-host-numeric"
//! export URLNORM_RESOLVE_TIMEOUT_MS="2000"
//! export URLNORM_DNS_CHECK="true"
//! ```
//!
//! ## Optional Variables
//!
//! - `URLNORM_DISABLED_RULES` - Comma-separated rule names removed from the
//!   default (all rules) set
//! - `URLNORM_RESOLVE_TIMEOUT_MS` - Hostname lookup timeout (default: 5000,
//!   range: 1-60000)
//! - `URLNORM_DNS_CHECK` - Resolve hosts during validation (default: false)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::entities::{NormalizationFlags, Rule};

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Rule names listed in `URLNORM_DISABLED_RULES`, as written.
    pub disabled_rules: Vec<String>,
    pub resolve_timeout_ms: u64,
    /// Whether validation resolves the host by default.
    pub dns_check: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            resolve_timeout_ms: 5_000,
            dns_check: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Missing variables fall back to [`Config::default`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let disabled_rules = env::var("URLNORM_DISABLED_RULES")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let resolve_timeout_ms = env::var("URLNORM_RESOLVE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.resolve_timeout_ms);

        let dns_check = env::var("URLNORM_DNS_CHECK")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.dns_check);

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Self {
            disabled_rules,
            resolve_timeout_ms,
            dns_check,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a disabled rule name is unknown
    /// - `resolve_timeout_ms` is outside 1-60000
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        self.flags()?;

        if self.resolve_timeout_ms == 0 || self.resolve_timeout_ms > 60_000 {
            anyhow::bail!(
                "URLNORM_RESOLVE_TIMEOUT_MS must be between 1 and 60000, got {}",
                self.resolve_timeout_ms
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// The default rule set minus the disabled rules.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown rule.
    pub fn flags(&self) -> Result<NormalizationFlags> {
        self.disabled_rules
            .iter()
            .try_fold(NormalizationFlags::all(), |flags, name| {
                let rule: Rule = name
                    .parse()
                    .with_context(|| "URLNORM_DISABLED_RULES contains an unknown rule")?;
                Ok(flags.without(rule))
            })
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        match self.flags() {
            Ok(flags) => tracing::info!("  Rules: {:?}", flags),
            Err(e) => tracing::info!("  Rules: invalid ({e:#})"),
        }
        tracing::info!("  Resolve timeout: {}ms", self.resolve_timeout_ms);
        tracing::info!("  DNS check: {}", if self.dns_check { "enabled" } else { "disabled" });
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from the environment, reading a
/// `.env` file first if one exists.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
