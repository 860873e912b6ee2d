//! Site value type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Property key holding a site's login page path.
pub const LOGIN_PAGE_PROPERTY: &str = "loginPage";

/// A configured site and its raw properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site name (e.g. `shell`, `website`).
    pub name: String,

    /// Raw key/value properties as configured.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Site {
    /// Create a site with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style helper to set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Look up a property by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The site's login page path, if configured.
    pub fn login_page(&self) -> Option<&str> {
        self.property(LOGIN_PAGE_PROPERTY)
    }
}
