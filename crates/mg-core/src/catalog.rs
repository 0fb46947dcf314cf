//! The microgame catalog: an ordered, read-only list of descriptors.
//!
//! Catalogs are loaded once (from JSON or built in memory) and never mutated
//! afterwards. An empty catalog is a valid value but is not playable; see
//! [`Catalog::ensure_playable`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::MicrogameDescriptor;
use crate::error::{CatalogError, CoreResult};

/// Ordered list of microgame descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    microgames: Vec<MicrogameDescriptor>,
}

impl Catalog {
    /// Build a catalog from descriptors, validating each one.
    pub fn new(microgames: Vec<MicrogameDescriptor>) -> CoreResult<Self> {
        for (index, descriptor) in microgames.iter().enumerate() {
            descriptor.validate(index)?;
        }
        Ok(Self { microgames })
    }

    /// Parse a catalog document of the form `{"microgames": [...]}`.
    pub fn from_json_str(source: &str) -> CoreResult<Self> {
        let raw: Catalog = serde_json::from_str(source)?;
        Self::new(raw.microgames)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            microgames = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Fail with [`CatalogError::Empty`] if there is nothing to play.
    pub fn ensure_playable(&self) -> CoreResult<()> {
        if self.microgames.is_empty() {
            Err(CatalogError::Empty)
        } else {
            Ok(())
        }
    }

    /// A new catalog holding only the unlocked descriptors, in order.
    pub fn unlocked(&self) -> Self {
        Self {
            microgames: self
                .microgames
                .iter()
                .filter(|d| d.unlocked)
                .cloned()
                .collect(),
        }
    }

    /// Descriptor at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&MicrogameDescriptor> {
        self.microgames.get(index)
    }

    /// Find a descriptor by scene name (case-insensitive).
    pub fn find(&self, scene: &str) -> Option<&MicrogameDescriptor> {
        self.microgames
            .iter()
            .find(|d| d.scene.eq_ignore_ascii_case(scene))
    }

    /// All descriptors in catalog order.
    pub fn microgames(&self) -> &[MicrogameDescriptor] {
        &self.microgames
    }

    /// Iterate over descriptors in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, MicrogameDescriptor> {
        self.microgames.iter()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.microgames.len()
    }

    /// Return `true` if the catalog has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.microgames.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MicrogameDescriptor;
    type IntoIter = std::slice::Iter<'a, MicrogameDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "microgames": [
            {"scene": "Jump", "command": "Jump!", "time_limit": 3.0},
            {"scene": "Dodge", "command": "Dodge!", "time_limit": 5.0, "unlocked": false},
            {"scene": "Catch"}
        ]
    }"#;

    #[test]
    fn parse_sample() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().command, "Jump!");
        assert!(!catalog.get(1).unwrap().unlocked);
        assert_eq!(catalog.get(2).unwrap().command, "Do something!");
    }

    #[test]
    fn parse_rejects_invalid_descriptor() {
        let src = r#"{"microgames": [{"scene": "Slow", "time_limit": 30.0}]}"#;
        let err = Catalog::from_json_str(src).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTimeLimit { .. }));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn empty_catalog_is_not_playable() {
        let catalog = Catalog::from_json_str(r#"{"microgames": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(catalog.ensure_playable(), Err(CatalogError::Empty)));
    }

    #[test]
    fn unlocked_filters_locked_entries() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let unlocked = catalog.unlocked();
        assert_eq!(unlocked.len(), 2);
        assert!(unlocked.find("Dodge").is_none());
        assert!(unlocked.find("jump").is_some());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn iterates_in_catalog_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let scenes: Vec<&str> = catalog.iter().map(|d| d.scene.as_str()).collect();
        assert_eq!(scenes, ["Jump", "Dodge", "Catch"]);
    }
}
