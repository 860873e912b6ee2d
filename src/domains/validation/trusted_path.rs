//! Trusted-path validation bypass.
//!
//! Requests under a small set of trusted administrative path prefixes skip
//! request validation entirely. Every other request is handed to the
//! injected default validator and its result is returned unchanged.
//!
//! The prefix set is assembled once from a built-in list plus the login page
//! of every configured site, and is never mutated afterwards, so a single
//! instance can be shared across all request tasks without locking.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    GuardError, RequestContext, RequestValidationSource, RequestValidator, ValidationOutcome,
};
use crate::domains::sites::SiteRegistry;

/// Prefixes that are always trusted.
pub const BUILT_IN_TRUSTED_PREFIXES: [&str; 3] =
    ["/sitecore/shell/", "/sitecore/admin/", "/-/speak/request/"];

/// Request validator that bypasses validation for trusted URL prefixes.
pub struct TrustedPathValidator {
    prefixes: Vec<String>,
    default_validator: Arc<dyn RequestValidator>,
}

impl TrustedPathValidator {
    /// Create a validator over an explicit prefix list.
    pub fn new<I, S>(prefixes: I, default_validator: Arc<dyn RequestValidator>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            default_validator,
        }
    }

    /// Create a validator trusting the built-in prefixes and every site's
    /// login page.
    ///
    /// Sites without a `loginPage` property are skipped. A registry failure
    /// is returned as [`GuardError::CollaboratorUnavailable`].
    pub fn from_sites(
        registry: &dyn SiteRegistry,
        default_validator: Arc<dyn RequestValidator>,
    ) -> Result<Self, GuardError> {
        Self::from_sites_with_extra(registry, &[], default_validator)
    }

    /// Like [`from_sites`](Self::from_sites), additionally trusting
    /// operator-supplied prefixes. Blank extra entries are ignored.
    pub fn from_sites_with_extra(
        registry: &dyn SiteRegistry,
        extra_prefixes: &[String],
        default_validator: Arc<dyn RequestValidator>,
    ) -> Result<Self, GuardError> {
        let sites = registry.get_sites()?;

        let mut prefixes: Vec<String> = BUILT_IN_TRUSTED_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect();

        prefixes.extend(
            sites
                .iter()
                .filter_map(|site| site.login_page())
                .map(str::to_string),
        );

        prefixes.extend(
            extra_prefixes
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        );

        info!(
            "Trusted path guard initialised with {} prefix(es) from {} site(s)",
            prefixes.len(),
            sites.len()
        );

        Ok(Self::new(prefixes, default_validator))
    }

    /// The configured trusted prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Whether validation should be skipped for `raw_url`.
    ///
    /// Matching is ordinal and case-insensitive. An empty URL is valid input
    /// and only matches an empty prefix.
    pub fn should_bypass(&self, raw_url: Option<&str>) -> Result<bool, GuardError> {
        let raw_url = raw_url.ok_or(GuardError::argument_absent("raw_url"))?;
        Ok(self.is_trusted(raw_url))
    }

    fn is_trusted(&self, raw_url: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| starts_with_ignore_case(raw_url, prefix))
    }

    /// Raw URL of the request in `context`, or an empty string when the
    /// context or its request is absent.
    pub fn extract_request_url(context: Option<&RequestContext>) -> String {
        context
            .and_then(|ctx| ctx.request.as_ref())
            .map(|request| request.raw_url.clone())
            .unwrap_or_default()
    }
}

impl RequestValidator for TrustedPathValidator {
    fn validate(
        &self,
        context: Option<&RequestContext>,
        value: &str,
        source: RequestValidationSource,
        collection_key: Option<&str>,
    ) -> ValidationOutcome {
        let url = Self::extract_request_url(context);

        if self.is_trusted(&url) {
            debug!(url = %url, %source, "Validation bypassed for trusted path");
            return ValidationOutcome::valid();
        }

        self.default_validator
            .validate(context, value, source, collection_key)
    }
}

impl fmt::Debug for TrustedPathValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustedPathValidator")
            .field("prefixes", &self.prefixes)
            .finish_non_exhaustive()
    }
}

/// Ordinal case-insensitive `starts_with`. Characters are compared one to
/// one through their full uppercase mapping, so `ß` matches only `ß`, never
/// `SS`.
fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    let mut chars = value.chars();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|c| chars_eq_ignore_case(c, p)))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}
