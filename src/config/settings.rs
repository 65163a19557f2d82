//! Application settings and configuration
//!
//! Settings come from environment variables (and a `.env` file when
//! present), with defaults suited to local development.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::validation::ValidationOptions;

/// Default request body limit (2 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            _ => anyhow::bail!("Invalid log format: {}. Expected: json or text", s),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: LogFormat,

    // Server settings
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub max_body_bytes: usize,

    // Validation
    /// Report body properties the catalogue does not declare
    pub reject_unknown_fields: bool,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            app_name: get("APP_NAME", "ai-api-contract"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: get("ENVIRONMENT", "development")
                .parse()
                .context("Invalid ENVIRONMENT value")?,
            log_level: get("LOG_LEVEL", "info"),
            log_format: get("LOG_FORMAT", "json")
                .parse()
                .context("Invalid LOG_FORMAT value")?,

            host: get("HOST", "0.0.0.0"),
            port: get("PORT", "8000").parse().context("Invalid PORT value")?,
            cors_enabled: get("CORS_ENABLED", "true")
                .parse()
                .context("Invalid CORS_ENABLED value")?,
            max_body_bytes: get("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string())
                .parse()
                .context("Invalid MAX_BODY_BYTES value")?,

            reject_unknown_fields: get("REJECT_UNKNOWN_FIELDS", "false")
                .parse()
                .context("Invalid REJECT_UNKNOWN_FIELDS value")?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be > 0");
        }

        if self.environment == Environment::Production && self.log_format == LogFormat::Text {
            tracing::warn!("Running in production with text logs");
        }

        Ok(())
    }

    /// Options applied to every validation the service performs
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            reject_unknown_fields: self.reject_unknown_fields,
        }
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "ai-api-contract".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_enabled: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            reject_unknown_fields: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "ai-api-contract");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.max_body_bytes, 2 * 1024 * 1024);
        assert!(settings.cors_enabled);
        assert!(!settings.reject_unknown_fields);
    }

    #[test]
    fn test_empty_lookup_matches_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.port, defaults.port);
        assert_eq!(settings.log_format, defaults.log_format);
        assert_eq!(settings.validation_options(), ValidationOptions::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("PORT", "9100"),
            ("ENVIRONMENT", "prod"),
            ("LOG_FORMAT", "text"),
            ("REJECT_UNKNOWN_FIELDS", "true"),
            ("MAX_BODY_BYTES", "1024"),
            ("CORS_ENABLED", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 9100);
        assert!(settings.is_production());
        assert_eq!(settings.log_format, LogFormat::Text);
        assert_eq!(settings.max_body_bytes, 1024);
        assert!(!settings.cors_enabled);
        assert!(settings.validation_options().reject_unknown_fields);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Settings::from_lookup(lookup(&[("PORT", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("MAX_BODY_BYTES", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_rejects_unparseable_flags() {
        for (key, value) in [
            ("ENVIRONMENT", "qa"),
            ("CORS_ENABLED", "maybe"),
            ("REJECT_UNKNOWN_FIELDS", "yes"),
        ] {
            let err = Settings::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid {} value", key));
        }
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_server_addr() {
        let settings = Settings::default();
        assert_eq!(settings.server_addr(), "0.0.0.0:8000");
    }
}
