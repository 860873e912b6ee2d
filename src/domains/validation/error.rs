//! Validation-specific error types.

use thiserror::Error;

use crate::domains::sites::SiteError;

/// Errors raised by the trusted-path guard.
///
/// A request value rejected by the default validator is not an error; it is
/// reported through `ValidationOutcome`.
#[derive(Debug, Error)]
pub enum GuardError {
    /// A required argument was not supplied.
    #[error("Required argument '{name}' is absent")]
    ArgumentAbsent { name: &'static str },

    /// A collaborator needed at construction could not supply its data.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] SiteError),
}

impl GuardError {
    /// Create an "argument absent" error.
    pub fn argument_absent(name: &'static str) -> Self {
        Self::ArgumentAbsent { name }
    }
}
