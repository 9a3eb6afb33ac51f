//! Persisted schema-version markers.

use std::collections::HashMap;
use std::sync::RwLock;

use meridian_core::error::Result;
use meridian_core::utils::SchemaVersion;

/// A store of persisted schema-version markers, keyed by service name.
///
/// The production implementation lives with the world persistence layer;
/// [`InMemoryVersionStore`] backs tests and single-process embeddings.
pub trait VersionStore: Send + Sync {
    /// Load the persisted version under `key`, if one was ever stored.
    fn load(&self, key: &str) -> Result<Option<SchemaVersion>>;

    /// Persist `version` under `key`, replacing any previous marker.
    fn store(&self, key: &str, version: SchemaVersion) -> Result<()>;
}

/// An in-memory implementation of the [`VersionStore`] trait.
#[derive(Default)]
pub struct InMemoryVersionStore {
    versions: RwLock<HashMap<String, SchemaVersion>>,
}

impl InMemoryVersionStore {
    /// Create an empty version store.
    pub fn new() -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store already holding `version` under `key`.
    pub fn with_version(key: impl Into<String>, version: SchemaVersion) -> Self {
        let store = Self::new();
        store
            .versions
            .write()
            .unwrap()
            .insert(key.into(), version);
        store
    }
}

impl VersionStore for InMemoryVersionStore {
    fn load(&self, key: &str) -> Result<Option<SchemaVersion>> {
        Ok(self.versions.read().unwrap().get(key).copied())
    }

    fn store(&self, key: &str, version: SchemaVersion) -> Result<()> {
        self.versions
            .write()
            .unwrap()
            .insert(key.to_string(), version);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing() {
        let store = InMemoryVersionStore::new();
        assert!(store.load("meridian.test").unwrap().is_none());
    }

    #[test]
    fn test_store_and_load() {
        let store = InMemoryVersionStore::new();
        store
            .store("meridian.test", SchemaVersion::new(1, 0))
            .unwrap();
        assert_eq!(
            store.load("meridian.test").unwrap(),
            Some(SchemaVersion::new(1, 0))
        );
    }

    #[test]
    fn test_with_version() {
        let store = InMemoryVersionStore::with_version("meridian.test", SchemaVersion::new(2, 1));
        assert_eq!(
            store.load("meridian.test").unwrap(),
            Some(SchemaVersion::new(2, 1))
        );
    }
}
