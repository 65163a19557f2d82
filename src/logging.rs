//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence
//! over the configured level.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogFormat;

/// Filter from `RUST_LOG`, or from `level` when it is unset or invalid
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global subscriber; logs go to stderr so command output
/// on stdout stays parseable
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = env_filter(level);

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        let filter = env_filter("info,ai_api_contract=debug");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_second_init_fails() {
        // Only one global subscriber can be installed per process
        let _ = init_tracing("warn", LogFormat::Text);
        assert!(init_tracing("warn", LogFormat::Json).is_err());
    }
}
