//! Transport layer for the guard service.
//!
//! The service is exposed over HTTP only (feature: `http`, adds axum, tower,
//! tower-http). The configuration and error types are always available so
//! that the library core builds without the HTTP stack.

mod config;
mod error;

#[cfg(feature = "http")]
pub mod http;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};

#[cfg(feature = "http")]
pub use http::HttpTransport;
