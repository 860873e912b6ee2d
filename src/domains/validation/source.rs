//! Request data sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The part of a request a validated value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestValidationSource {
    QueryString,
    Form,
    Cookies,
    Files,
    RawUrl,
    Path,
    PathInfo,
    Headers,
}

impl RequestValidationSource {
    /// Collection name as shown in rejection messages.
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::QueryString => "Request.QueryString",
            Self::Form => "Request.Form",
            Self::Cookies => "Request.Cookies",
            Self::Files => "Request.Files",
            Self::RawUrl => "Request.RawUrl",
            Self::Path => "Request.Path",
            Self::PathInfo => "Request.PathInfo",
            Self::Headers => "Request.Headers",
        }
    }
}

impl fmt::Display for RequestValidationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}
