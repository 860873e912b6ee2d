//! Request validation middleware.
//!
//! Runs the installed [`RequestValidator`] over every piece of request data
//! before the request reaches a handler: the path, each query-string value,
//! each cookie, each header and, for urlencoded bodies, each form field. The
//! first invalid fragment rejects the request with `400 Bad Request`.

use axum::{
    Json,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{RequestContext, RequestValidationSource, RequestValidator};

/// Longest value excerpt quoted back in a rejection message.
const MAX_QUOTED_CHARS: usize = 20;

/// Form fields with this prefix carry framework state and are not validated.
const FRAMEWORK_FIELD_PREFIX: &str = "__";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Shared state for the validation middleware.
#[derive(Clone)]
pub struct ValidationState {
    validator: Arc<dyn RequestValidator>,
    max_form_bytes: usize,
}

impl ValidationState {
    /// Create middleware state around the installed validator.
    pub fn new(validator: Arc<dyn RequestValidator>, max_form_bytes: usize) -> Self {
        Self {
            validator,
            max_form_bytes,
        }
    }
}

/// One piece of request data to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    source: RequestValidationSource,
    key: Option<String>,
    value: String,
}

impl Fragment {
    fn new(source: RequestValidationSource, key: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            source,
            key: key.map(str::to_string),
            value: value.into(),
        }
    }
}

/// JSON body returned when request data is rejected.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Rejection {
    error: String,
    source: RequestValidationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    failure_index: usize,
}

impl Rejection {
    fn new(fragment: Fragment, failure_index: usize) -> Self {
        let excerpt = truncate(&fragment.value);
        let error = match &fragment.key {
            Some(key) => format!(
                "A potentially dangerous {} value was detected from the client ({}=\"{}\").",
                fragment.source, key, excerpt
            ),
            None => format!(
                "A potentially dangerous {} value was detected from the client ({}).",
                fragment.source, excerpt
            ),
        };

        Self {
            error,
            source: fragment.source,
            key: fragment.key,
            failure_index,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Axum middleware entry point.
///
/// Install with `axum::middleware::from_fn_with_state(state, request_validation)`.
pub async fn request_validation(
    State(state): State<ValidationState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts);

    let mut fragments = match url_fragments(&parts.uri) {
        Ok(fragments) => fragments,
        Err(e) => {
            warn!("Rejecting request with malformed query string: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Malformed query string");
        }
    };
    fragments.extend(cookie_fragments(&parts.headers));
    fragments.extend(header_fragments(&parts.headers));

    let body = if is_form(&parts.headers) {
        let bytes = match read_limited(body, state.max_form_bytes).await {
            Ok(bytes) => bytes,
            Err(response) => return response,
        };

        match form_fragments(&bytes) {
            Ok(form) => fragments.extend(form),
            Err(e) => {
                warn!("Rejecting request with malformed form body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, "Malformed form body");
            }
        }
        Body::from(bytes)
    } else {
        body
    };

    if let Some(rejection) = first_rejection(state.validator.as_ref(), &context, fragments) {
        warn!(
            method = %parts.method,
            path = %parts.uri.path(),
            source = %rejection.source,
            key = ?rejection.key,
            failure_index = rejection.failure_index,
            "Potentially dangerous request data rejected"
        );
        return rejection.into_response();
    }

    debug!("Request data accepted for {}", parts.uri.path());
    next.run(Request::from_parts(parts, body)).await
}

/// Validate fragments in order, stopping at the first failure.
fn first_rejection(
    validator: &dyn RequestValidator,
    context: &RequestContext,
    fragments: Vec<Fragment>,
) -> Option<Rejection> {
    fragments.into_iter().find_map(|fragment| {
        let outcome = validator.validate(
            Some(context),
            &fragment.value,
            fragment.source,
            fragment.key.as_deref(),
        );
        (!outcome.is_valid).then(|| Rejection::new(fragment, outcome.failure_index))
    })
}

fn url_fragments(uri: &http::Uri) -> Result<Vec<Fragment>, serde_urlencoded::de::Error> {
    // Path is validated decoded; a literal `<` never survives URI parsing.
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    let mut fragments = vec![Fragment::new(RequestValidationSource::Path, None, path)];

    if let Some(query) = uri.query() {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        fragments.extend(pairs.into_iter().map(|(k, v)| {
            Fragment::new(RequestValidationSource::QueryString, Some(k.as_str()), v)
        }));
    }

    Ok(fragments)
}

fn cookie_fragments(headers: &HeaderMap) -> Vec<Fragment> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or(("", pair)))
        .map(|(name, value)| Fragment::new(RequestValidationSource::Cookies, Some(name), value))
        .collect()
}

fn header_fragments(headers: &HeaderMap) -> Vec<Fragment> {
    headers
        .iter()
        .filter(|(name, _)| **name != header::COOKIE)
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| {
                Fragment::new(RequestValidationSource::Headers, Some(name.as_str()), value)
            })
        })
        .collect()
}

fn form_fragments(body: &[u8]) -> Result<Vec<Fragment>, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
    Ok(pairs
        .into_iter()
        .filter(|(k, _)| !k.starts_with(FRAMEWORK_FIELD_PREFIX))
        .map(|(k, v)| Fragment::new(RequestValidationSource::Form, Some(k.as_str()), v))
        .collect())
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        })
}

async fn read_limited(body: Body, limit: usize) -> Result<Bytes, Response> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!("Rejecting form body larger than {} bytes", limit);
            Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Form body too large",
            ))
        }
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "Unreadable request body",
            ))
        }
    }
}

fn truncate(value: &str) -> String {
    match value.char_indices().nth(MAX_QUOTED_CHARS) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}
