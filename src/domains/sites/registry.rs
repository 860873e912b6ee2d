//! Site registry - the source of per-site configuration.
//!
//! The registry is queried once when the validation guard is built. Two
//! backends are provided: a fixed in-memory list and a JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Site, SiteError};

/// Supplies the configured sites.
pub trait SiteRegistry: Send + Sync {
    /// Return every configured site.
    fn get_sites(&self) -> Result<Vec<Site>, SiteError>;
}

/// Registry backed by a fixed list of sites.
#[derive(Debug, Clone, Default)]
pub struct InMemorySiteRegistry {
    sites: Vec<Site>,
}

impl InMemorySiteRegistry {
    /// Create a registry over the given sites.
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }
}

impl SiteRegistry for InMemorySiteRegistry {
    fn get_sites(&self) -> Result<Vec<Site>, SiteError> {
        Ok(self.sites.clone())
    }
}

/// On-disk layout of a site definitions file.
#[derive(Debug, Deserialize)]
struct SitesDocument {
    #[serde(default)]
    sites: Vec<Site>,
}

/// Registry that reads site definitions from a JSON file on every query.
///
/// Expected layout:
///
/// ```json
/// { "sites": [ { "name": "website", "properties": { "loginPage": "/login/" } } ] }
/// ```
#[derive(Debug, Clone)]
pub struct FileSiteRegistry {
    path: PathBuf,
}

impl FileSiteRegistry {
    /// Create a registry reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this registry reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SiteRegistry for FileSiteRegistry {
    fn get_sites(&self) -> Result<Vec<Site>, SiteError> {
        debug!("Reading site definitions from {:?}", self.path);

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| SiteError::unavailable(&self.path, e))?;
        let document: SitesDocument =
            serde_json::from_str(&raw).map_err(|e| SiteError::malformed(&self.path, e))?;

        info!(
            "Loaded {} site definition(s) from {:?}",
            document.sites.len(),
            self.path
        );
        Ok(document.sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_returns_sites() {
        let registry = InMemorySiteRegistry::new(vec![Site::new("shell"), Site::new("website")]);
        let sites = registry.get_sites().unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].name, "website");
    }

    #[test]
    fn test_file_registry_reads_sites() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sites.json");
        fs::write(
            &file,
            r#"{"sites":[
                {"name":"shell","properties":{"loginPage":"/sitecore/login"}},
                {"name":"website","properties":{"hostName":"example.com"}}
            ]}"#,
        )
        .unwrap();

        let registry = FileSiteRegistry::new(&file);
        let sites = registry.get_sites().unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].login_page(), Some("/sitecore/login"));
        assert_eq!(sites[1].login_page(), None);
    }

    #[test]
    fn test_file_registry_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let registry = FileSiteRegistry::new(temp_dir.path().join("missing.json"));

        assert!(matches!(
            registry.get_sites(),
            Err(SiteError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_file_registry_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("sites.json");
        fs::write(&file, "{ not json").unwrap();

        let registry = FileSiteRegistry::new(&file);
        assert!(matches!(
            registry.get_sites(),
            Err(SiteError::Malformed { .. })
        ));
    }
}
