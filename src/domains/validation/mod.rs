//! Validation domain module.
//!
//! Request validation rejects request data that looks like a script-injection
//! payload. This module holds the pieces the hosting pipeline plugs together:
//!
//! - `validator.rs` - The `RequestValidator` extension point and its outcome type
//! - `default.rs` - The platform's standard script-pattern validator
//! - `trusted_path.rs` - `TrustedPathValidator`, which skips validation for
//!   trusted admin paths and delegates everything else
//! - `context.rs` - Read-only view of the request being validated
//! - `source.rs` - Which part of the request a value came from
//! - `middleware.rs` - Axum middleware that runs the validator over a request
//!   (feature: `http`)
//! - `error.rs` - Validation-specific error types

mod context;
mod default;
mod error;
mod source;
mod trusted_path;
mod validator;

#[cfg(feature = "http")]
pub mod middleware;

pub use context::{RequestContext, RequestInfo};
pub use default::DefaultValidator;
pub use error::GuardError;
pub use source::RequestValidationSource;
pub use trusted_path::{BUILT_IN_TRUSTED_PREFIXES, TrustedPathValidator};
pub use validator::{RequestValidator, ValidationOutcome};
