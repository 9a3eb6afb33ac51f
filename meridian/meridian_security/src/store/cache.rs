//! The committed resource cache.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use meridian_core::id::CellId;

use crate::model::CellResource;

/// A cached authorization value for one cell.
///
/// `NoAcl` records that a cell has no security configuration attached.
/// Caching the negative result is deliberate: without it every lookup for
/// an unconfigured cell would go back to the cell's security component.
/// The facade translates `NoAcl` to an absent resource.
#[derive(Debug, Clone)]
pub enum CachedResource {
    /// The cell's authorization snapshot
    Acl(Arc<CellResource>),

    /// The cell has no authorization configuration
    NoAcl,
}

impl CachedResource {
    /// The resource snapshot, or `None` for the no-ACL marker.
    pub fn as_resource(&self) -> Option<&Arc<CellResource>> {
        match self {
            CachedResource::Acl(resource) => Some(resource),
            CachedResource::NoAcl => None,
        }
    }
}

impl fmt::Display for CachedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachedResource::Acl(resource) => write!(f, "{}", resource),
            CachedResource::NoAcl => write!(f, "no-acl"),
        }
    }
}

/// The committed, process-wide mapping from cell id to cached resource.
///
/// Entries are created only when a transaction commits; readers in other
/// transactions never observe uncommitted values. All operations are
/// non-blocking map operations, concurrent per key.
#[derive(Default)]
pub struct ResourceCache {
    entries: DashMap<CellId, CachedResource>,
}

impl ResourceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up the committed value for a cell.
    pub fn get(&self, cell: &CellId) -> Option<CachedResource> {
        self.entries.get(cell).map(|entry| entry.value().clone())
    }

    /// Insert or replace the committed value for a cell.
    pub fn insert(&self, cell: CellId, value: CachedResource) {
        self.entries.insert(cell, value);
    }

    /// Evict the committed value for a cell.
    pub fn remove(&self, cell: &CellId) {
        self.entries.remove(cell);
    }

    /// Whether the cache holds a committed value for a cell.
    pub fn contains(&self, cell: &CellId) -> bool {
        self.entries.contains_key(cell)
    }

    /// The number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no committed entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
