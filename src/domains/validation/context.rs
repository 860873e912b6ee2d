//! Read-only view of the request being validated.

use serde::{Deserialize, Serialize};

/// The request-context handle passed to validators.
///
/// The hosting pipeline may hand validators a context without a request
/// (e.g. for values validated outside a request).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request: Option<RequestInfo>,
}

/// The request fields a validator may consult.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    /// HTTP method.
    pub method: String,

    /// Path and query string exactly as received, undecoded.
    pub raw_url: String,
}

impl RequestContext {
    /// A context carrying the given request.
    pub fn with_request(request: RequestInfo) -> Self {
        Self {
            request: Some(request),
        }
    }

    /// A context without a request.
    pub fn without_request() -> Self {
        Self::default()
    }

    /// Build a context from incoming HTTP request parts.
    ///
    /// Only the origin-form path and query are kept; scheme and authority of
    /// an absolute-form request target are not part of the raw URL.
    #[cfg(feature = "http")]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let raw_url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Self::with_request(RequestInfo::new(parts.method.as_str(), raw_url))
    }
}

impl RequestInfo {
    /// Create a request view.
    pub fn new(method: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            raw_url: raw_url.into(),
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    fn parts_for(uri: &str) -> http::request::Parts {
        let (parts, _) = http::Request::builder()
            .method("POST")
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_from_parts_keeps_query_undecoded() {
        let context = RequestContext::from_parts(&parts_for("/sitecore/admin/login?x=%3Cb%3E&y=1"));
        let request = context.request.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.raw_url, "/sitecore/admin/login?x=%3Cb%3E&y=1");
    }

    #[test]
    fn test_from_parts_drops_authority() {
        let context = RequestContext::from_parts(&parts_for("http://cms.local/sitecore/shell/a?b=c"));
        assert_eq!(context.request.unwrap().raw_url, "/sitecore/shell/a?b=c");
    }
}
