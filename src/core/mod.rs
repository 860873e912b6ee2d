//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the guard
//! service, including error handling, configuration, server state and the
//! transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::GuardServer;
pub use transport::{TransportConfig, TransportError};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
