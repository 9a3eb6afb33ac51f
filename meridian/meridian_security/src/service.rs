//! The cell-resource service.
//!
//! This module orchestrates transaction-context creation, lazy derivation
//! of authorization resources from a cell's security configuration, and the
//! cache mutation API. It owns the committed [`ResourceCache`] and a
//! registry of live per-transaction contexts.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, info};
use meridian_core::error::{Result, SecurityError, TransactionError};
use meridian_core::id::{CellId, TransactionId};
use meridian_core::utils::SchemaVersion;

use crate::model::{CellResource, PermissionEntry, Principal};
use crate::store::{CachedResource, ResourceCache, ResourceContext, VersionStore};

/// The key the service persists its schema version under.
const VERSION_KEY: &str = "meridian.security.service.version";

/// The major version of the cached-data schema.
const MAJOR_VERSION: u32 = 1;

/// The minor version of the cached-data schema.
const MINOR_VERSION: u32 = 0;

/// A cell's security configuration: the owner set and permission entries
/// its security component carries.
#[derive(Debug, Clone)]
pub struct CellSecurity {
    /// Principals that own the cell
    pub owners: HashSet<Principal>,

    /// The cell's permission entries
    pub permissions: BTreeSet<PermissionEntry>,
}

/// Lookup of a cell's authoritative security configuration.
///
/// This is the external collaborator the cache memoizes. `None` means the
/// cell has no security configuration attached, which is not an error.
pub trait CellSecurityLookup: Send + Sync {
    /// The security configuration for `cell`, if it has one.
    fn security(&self, cell: &CellId) -> Option<CellSecurity>;
}

/// The transactional authorization cache service.
///
/// Every operation takes the id of the transaction it executes under and
/// joins (or creates) that transaction's overlay context. Mutations stay
/// in the overlay until [`commit`](CellResourceService::commit); an
/// [`abort`](CellResourceService::abort) discards them. Transaction ids
/// are single-use: once committed or aborted, an id must not be joined
/// again.
pub struct CellResourceService {
    /// The committed resource cache, shared across transactions
    cache: Arc<ResourceCache>,

    /// Live overlay contexts, keyed by transaction id
    contexts: DashMap<TransactionId, Arc<ResourceContext>>,

    /// The authoritative security-configuration collaborator
    security: Arc<dyn CellSecurityLookup>,
}

impl CellResourceService {
    /// Create the service, validating the persisted schema version.
    ///
    /// A persisted marker incompatible with this service's version has no
    /// migration path and is a fatal configuration error. A missing marker
    /// (first start) is written out.
    pub fn new(
        security: Arc<dyn CellSecurityLookup>,
        versions: &dyn VersionStore,
    ) -> Result<Self> {
        let current = SchemaVersion::new(MAJOR_VERSION, MINOR_VERSION);

        match versions.load(VERSION_KEY)? {
            None => {
                info!("recording service version {}", current);
                versions.store(VERSION_KEY, current)?;
            }
            Some(persisted) if persisted.is_compatible_with(&current) => {
                if persisted != current {
                    info!("upgrading service version {} to {}", persisted, current);
                    versions.store(VERSION_KEY, current)?;
                }
            }
            Some(persisted) => {
                return Err(SecurityError::VersionMismatch { persisted, current }.into());
            }
        }

        info!("security service ready");

        Ok(Self {
            cache: Arc::new(ResourceCache::new()),
            contexts: DashMap::new(),
            security,
        })
    }

    /// Join the context for `txn`, creating it on first use.
    ///
    /// Idempotent per transaction: joining the same id twice returns the
    /// same context.
    pub fn join(&self, txn: TransactionId) -> Arc<ResourceContext> {
        self.contexts
            .entry(txn)
            .or_insert_with(|| Arc::new(ResourceContext::new(txn, self.cache.clone())))
            .value()
            .clone()
    }

    /// The authorization resource for a cell, or `None` when the cell has
    /// no security configuration.
    ///
    /// Resolution order: the transaction's overlay, the committed cache,
    /// then lazy derivation from the security collaborator. A collaborator
    /// miss records the no-ACL marker in the overlay so that once this
    /// transaction commits, no later lookup in any transaction re-derives
    /// it.
    pub fn get_resource(
        &self,
        txn: TransactionId,
        cell: &CellId,
    ) -> Result<Option<Arc<CellResource>>> {
        // The context checks our own pending changes first and falls back
        // to the committed cache.
        let ctx = self.join(txn);
        if let Some(cached) = ctx.get(cell)? {
            debug!("found {} for cell {}", cached, cell);
            return Ok(cached.as_resource().cloned());
        }

        // Total miss: recreate the resource from the cell's security
        // configuration.
        match self.security.security(cell) {
            None => {
                debug!("no security configuration for cell {}", cell);
                ctx.add(*cell, CachedResource::NoAcl)?;
                Ok(None)
            }
            Some(config) => {
                let resource = Arc::new(CellResource::new(
                    *cell,
                    config.owners,
                    config.permissions,
                ));
                ctx.add(*cell, CachedResource::Acl(resource.clone()))?;
                debug!("created resource for cell {}", cell);
                Ok(Some(resource))
            }
        }
    }

    /// Replace (or create) the resource for a cell with fresh owner and
    /// permission data.
    ///
    /// A new immutable snapshot is built every time; a resource instance
    /// already visible through the committed cache is never mutated.
    pub fn update_resource(
        &self,
        txn: TransactionId,
        cell: CellId,
        owners: HashSet<Principal>,
        permissions: BTreeSet<PermissionEntry>,
    ) -> Result<()> {
        debug!("update resource for cell {}", cell);

        let ctx = self.join(txn);
        let resource = Arc::new(CellResource::new(cell, owners, permissions));
        ctx.add(cell, CachedResource::Acl(resource))
    }

    /// Evict a cell from the cache. The resource is re-derived from the
    /// security collaborator the next time it is requested.
    pub fn invalidate_resource(&self, txn: TransactionId, cell: CellId) -> Result<()> {
        debug!("invalidate resource for cell {}", cell);

        let ctx = self.join(txn);
        ctx.remove(cell)
    }

    /// Apply the transaction's overlay to the committed cache and retire
    /// its context.
    pub fn commit(&self, txn: TransactionId) -> Result<()> {
        let (_, ctx) = self
            .contexts
            .remove(&txn)
            .ok_or(TransactionError::NotJoined(txn))?;
        ctx.commit()
    }

    /// Discard the transaction's overlay and retire its context.
    pub fn abort(&self, txn: TransactionId, retryable: bool) -> Result<()> {
        let (_, ctx) = self
            .contexts
            .remove(&txn)
            .ok_or(TransactionError::NotJoined(txn))?;
        ctx.abort(retryable)
    }

    /// The committed cache.
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }
}
