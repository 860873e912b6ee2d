//! Site-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading site definitions.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The site definitions could not be read at all.
    #[error("Site registry unavailable at '{path}': {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The site definitions were read but could not be parsed.
    #[error("Malformed site definitions in '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other registry failure.
    #[error("Site registry error: {0}")]
    Other(String),
}

impl SiteError {
    /// Create an "unavailable" error.
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a "malformed" error.
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    /// Create a generic registry error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
