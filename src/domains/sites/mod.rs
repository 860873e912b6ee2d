//! Sites domain module.
//!
//! A site is a named set of key/value properties loaded from the hosting
//! content-management configuration. The validation domain only reads the
//! `loginPage` property, but the registry exposes every property so other
//! consumers can be added without changing the loading code.
//!
//! ## Architecture
//!
//! - `model.rs` - The `Site` value type
//! - `registry.rs` - The `SiteRegistry` trait and its in-memory/file backends
//! - `error.rs` - Site-specific error types

mod error;
mod model;
mod registry;

pub use error::SiteError;
pub use model::{LOGIN_PAGE_PROPERTY, Site};
pub use registry::{FileSiteRegistry, InMemorySiteRegistry, SiteRegistry};
