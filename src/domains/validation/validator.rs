//! The request validation extension point.

use serde::Serialize;

use super::{RequestContext, RequestValidationSource};

/// Result of validating one request-data fragment.
///
/// `failure_index` is the offset into the value where invalid content
/// begins. It is only meaningful when `is_valid` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub failure_index: usize,
}

impl ValidationOutcome {
    /// A passing outcome.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            failure_index: 0,
        }
    }

    /// A failing outcome with the offset of the offending content.
    pub fn invalid(failure_index: usize) -> Self {
        Self {
            is_valid: false,
            failure_index,
        }
    }
}

/// Validates request-data fragments on behalf of the hosting pipeline.
///
/// The pipeline calls `validate` once per fragment (per query parameter,
/// form field, cookie, ...). Implementations are shared across all request
/// tasks.
pub trait RequestValidator: Send + Sync {
    fn validate(
        &self,
        context: Option<&RequestContext>,
        value: &str,
        source: RequestValidationSource,
        collection_key: Option<&str>,
    ) -> ValidationOutcome;
}
