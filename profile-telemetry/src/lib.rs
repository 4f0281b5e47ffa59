//! Observability setup for binaries built on the deploy profile crates.
//!
//! Library crates only emit `tracing` events; installing a subscriber is left
//! to binaries through [`init_tracing`].

#![warn(missing_docs, clippy::pedantic)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the configured default filter.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `profile_resolver=debug`.
    pub default_filter: String,
    /// Include the event target (module path) in each line.
    pub with_target: bool,
    /// Emit ANSI colour codes.
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".into(),
            with_target: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Overrides the default filter directive.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Builds the effective filter, preferring `RUST_LOG` when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the chosen directive cannot be parsed.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match std::env::var(FILTER_ENV) {
            Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive)
                .with_context(|| format!("invalid {FILTER_ENV} directive `{directive}`")),
            _ => EnvFilter::try_new(&self.default_filter)
                .with_context(|| format!("invalid log filter `{}`", self.default_filter)),
        }
    }
}

/// Installs a global fmt subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<()> {
    let filter = config.env_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
