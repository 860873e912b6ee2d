//! Trusted-path request validation guard.
//!
//! Request validation rejects request data that resembles a script-injection
//! payload. Administrative tooling legitimately posts markup, so requests
//! whose raw URL starts with a trusted prefix skip validation entirely; all
//! other requests are checked by the default validator unchanged.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, server state and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **sites**: Site definitions and the registry they are read from
//!   - **validation**: The validator extension point, the default validator,
//!     `TrustedPathValidator` and the HTTP middleware that drives them
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trusted_path_guard::domains::sites::{InMemorySiteRegistry, Site};
//! use trusted_path_guard::domains::validation::{DefaultValidator, TrustedPathValidator};
//!
//! let registry = InMemorySiteRegistry::new(vec![
//!     Site::new("website").with_property("loginPage", "/login/"),
//! ]);
//! let guard = TrustedPathValidator::from_sites(&registry, Arc::new(DefaultValidator::new()))
//!     .unwrap();
//!
//! assert!(guard.should_bypass(Some("/SITECORE/SHELL/x")).unwrap());
//! assert!(guard.should_bypass(Some("/login/page")).unwrap());
//! assert!(!guard.should_bypass(Some("/public/page")).unwrap());
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, GuardServer, Result};
