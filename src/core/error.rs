//! Error types and handling for the guard service.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for guard service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the guard service.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the validation domain.
    #[error("Validation guard error: {0}")]
    Guard(#[from] crate::domains::validation::GuardError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
