//! Domains module containing business logic organized by bounded contexts.
//!
//! - **sites**: Per-site configuration read from the hosting registry
//! - **validation**: Request validation and the trusted-path bypass

pub mod sites;
pub mod validation;
