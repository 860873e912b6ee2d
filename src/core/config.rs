//! Configuration management for the guard service.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default upper bound for buffered urlencoded form bodies (4 MiB).
pub const DEFAULT_MAX_FORM_BYTES: usize = 4 * 1024 * 1024;

/// Main configuration structure for the guard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Request validation configuration.
    pub validation: ValidationConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the service as reported on the info endpoint.
    pub name: String,

    /// The version of the service.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for request validation and the trusted-path bypass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// JSON file holding site definitions.
    /// If None, no sites are configured and only built-in prefixes apply.
    pub sites_file: Option<PathBuf>,

    /// Additional trusted prefixes supplied by the operator.
    #[serde(default)]
    pub extra_trusted_prefixes: Vec<String>,

    /// Largest urlencoded form body buffered for validation.
    pub max_form_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sites_file: None,
            extra_trusted_prefixes: Vec::new(),
            max_form_bytes: DEFAULT_MAX_FORM_BYTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "trusted-path-guard".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `GUARD_`.
    /// For example: `GUARD_SERVER_NAME`, `GUARD_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("GUARD_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("GUARD_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(sites_file) = std::env::var("GUARD_SITES_FILE") {
            config.validation.sites_file = Some(PathBuf::from(sites_file));
            info!(
                "Site definitions will be read from {:?}",
                config.validation.sites_file
            );
        } else {
            warn!(
                "GUARD_SITES_FILE not set - no site login pages will be trusted, \
                 only built-in prefixes apply."
            );
        }

        if let Ok(prefixes) = std::env::var("GUARD_TRUSTED_PREFIXES") {
            config.validation.extra_trusted_prefixes = parse_prefix_list(&prefixes);
            info!(
                "Extra trusted prefixes: {:?}",
                config.validation.extra_trusted_prefixes
            );
        }

        if let Ok(max) = std::env::var("GUARD_MAX_FORM_BYTES") {
            config.validation.max_form_bytes = max.parse().unwrap_or_else(|_| {
                warn!("Invalid GUARD_MAX_FORM_BYTES '{}', using default", max);
                DEFAULT_MAX_FORM_BYTES
            });
        }

        config
    }

    /// Check the configuration for values the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.validation.max_form_bytes == 0 {
            return Err(Error::config("max_form_bytes must be greater than zero"));
        }

        if let Some(prefix) = self
            .validation
            .extra_trusted_prefixes
            .iter()
            .find(|p| !p.starts_with('/'))
        {
            return Err(Error::config(format!(
                "trusted prefix '{prefix}' must be an absolute path starting with '/'"
            )));
        }

        Ok(())
    }
}

/// Split a comma-separated prefix list, dropping blank entries.
fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_sites_file_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("GUARD_SITES_FILE", "/etc/guard/sites.json");
        }
        let config = Config::from_env();
        assert_eq!(
            config.validation.sites_file,
            Some(PathBuf::from("/etc/guard/sites.json"))
        );
        unsafe {
            std::env::remove_var("GUARD_SITES_FILE");
        }
    }

    #[test]
    fn test_trusted_prefixes_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("GUARD_TRUSTED_PREFIXES", "/api/internal/, ,/tools/");
        }
        let config = Config::from_env();
        assert_eq!(
            config.validation.extra_trusted_prefixes,
            vec!["/api/internal/".to_string(), "/tools/".to_string()]
        );
        unsafe {
            std::env::remove_var("GUARD_TRUSTED_PREFIXES");
        }
    }

    #[test]
    fn test_invalid_max_form_bytes_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("GUARD_MAX_FORM_BYTES", "lots");
        }
        let config = Config::from_env();
        assert_eq!(config.validation.max_form_bytes, DEFAULT_MAX_FORM_BYTES);
        unsafe {
            std::env::remove_var("GUARD_MAX_FORM_BYTES");
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_relative_prefix_rejected() {
        let mut config = Config::default();
        config.validation.extra_trusted_prefixes = vec!["admin/".to_string()];
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_form_limit_rejected() {
        let mut config = Config::default();
        config.validation.max_form_bytes = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
