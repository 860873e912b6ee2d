//! Guard server state and lifecycle.
//!
//! The trusted-path validator is built exactly once here, at startup, from
//! the configured site registry. The resulting instance is shared by every
//! request task for the lifetime of the process.

use std::sync::Arc;
use tracing::{info, instrument};

use super::config::{Config, ValidationConfig};
use super::error::Result;
use crate::domains::sites::{FileSiteRegistry, InMemorySiteRegistry, SiteRegistry};
use crate::domains::validation::{DefaultValidator, TrustedPathValidator};

#[cfg(feature = "http")]
use crate::domains::validation::middleware::ValidationState;

/// Application state: configuration plus the installed validator.
#[derive(Clone, Debug)]
pub struct GuardServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The process-wide request validator.
    validator: Arc<TrustedPathValidator>,
}

impl GuardServer {
    /// Build the server, resolving site definitions and the trusted prefix
    /// set.
    ///
    /// Fails when the configuration is invalid or the site registry cannot
    /// be read.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let registry = site_registry(&config.validation);
        let validator = TrustedPathValidator::from_sites_with_extra(
            registry.as_ref(),
            &config.validation.extra_trusted_prefixes,
            Arc::new(DefaultValidator::new()),
        )?;

        info!("Trusted prefixes: {:?}", validator.prefixes());

        Ok(Self {
            config: Arc::new(config),
            validator: Arc::new(validator),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The installed trusted-path validator.
    pub fn validator(&self) -> &Arc<TrustedPathValidator> {
        &self.validator
    }

    /// State for the request validation middleware.
    #[cfg(feature = "http")]
    pub fn validation_state(&self) -> ValidationState {
        ValidationState::new(
            self.validator.clone(),
            self.config.validation.max_form_bytes,
        )
    }
}

fn site_registry(config: &ValidationConfig) -> Box<dyn SiteRegistry> {
    match &config.sites_file {
        Some(path) => Box::new(FileSiteRegistry::new(path)),
        None => Box::new(InMemorySiteRegistry::default()),
    }
}
