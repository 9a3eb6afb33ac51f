//! Per-transaction overlay contexts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, trace};
use meridian_core::error::{Result, TransactionError};
use meridian_core::id::{CellId, TransactionId};

use super::{CachedResource, ResourceCache};

/// A pending cache mutation recorded inside one transaction.
#[derive(Debug, Clone)]
pub enum OverlayRecord {
    /// Insert or replace the cell's cached value at commit
    Add(CachedResource),

    /// Evict the cell's cached value at commit
    Remove,
}

/// Lifecycle state of a transaction context.
///
/// A context starts open and terminates exactly once, by commit or abort.
/// Both terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Accepting reads and overlay writes
    Open,

    /// Overlay applied to the committed cache
    Committed,

    /// Overlay discarded
    Aborted,
}

struct ContextInner {
    overlay: HashMap<CellId, OverlayRecord>,
    state: ContextState,
}

/// The overlay a single transaction records its pending cache mutations in.
///
/// Reads consult the overlay before the committed cache, so a transaction
/// always observes its own writes; the last overlay write for a cell wins
/// within the transaction. Nothing reaches the shared cache until
/// [`commit`](ResourceContext::commit), and an abort leaves no trace.
pub struct ResourceContext {
    txn: TransactionId,
    cache: Arc<ResourceCache>,
    inner: RwLock<ContextInner>,
}

impl ResourceContext {
    /// Create an open context for the given transaction over the committed
    /// cache.
    pub fn new(txn: TransactionId, cache: Arc<ResourceCache>) -> Self {
        Self {
            txn,
            cache,
            inner: RwLock::new(ContextInner {
                overlay: HashMap::new(),
                state: ContextState::Open,
            }),
        }
    }

    /// The transaction this context belongs to.
    pub fn transaction(&self) -> TransactionId {
        self.txn
    }

    /// The context's lifecycle state.
    pub fn state(&self) -> ContextState {
        self.inner.read().unwrap().state
    }

    /// Look up a cell's value as seen by this transaction.
    ///
    /// A pending `Add` returns the pending value and a pending `Remove`
    /// reads as a miss, forcing the caller to re-derive; otherwise the
    /// committed cache answers.
    pub fn get(&self, cell: &CellId) -> Result<Option<CachedResource>> {
        let inner = self.inner.read().unwrap();
        self.check_open(&inner)?;

        match inner.overlay.get(cell) {
            Some(OverlayRecord::Add(value)) => Ok(Some(value.clone())),
            Some(OverlayRecord::Remove) => Ok(None),
            None => Ok(self.cache.get(cell)),
        }
    }

    /// Record a pending insert/replace for a cell.
    pub fn add(&self, cell: CellId, value: CachedResource) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        self.check_open(&inner)?;

        trace!("txn {}: overlay add for cell {}", self.txn, cell);
        inner.overlay.insert(cell, OverlayRecord::Add(value));
        Ok(())
    }

    /// Record a pending eviction for a cell.
    pub fn remove(&self, cell: CellId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        self.check_open(&inner)?;

        trace!("txn {}: overlay remove for cell {}", self.txn, cell);
        inner.overlay.insert(cell, OverlayRecord::Remove);
        Ok(())
    }

    /// Apply every overlay record to the committed cache and terminate the
    /// context.
    ///
    /// Records are applied per key; concurrent commits from other contexts
    /// interleave at per-key granularity, last committer wins.
    pub fn commit(&self) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        self.check_open(&inner)?;

        inner.state = ContextState::Committed;
        debug!(
            "txn {}: committing {} overlay record(s)",
            self.txn,
            inner.overlay.len()
        );

        for (cell, record) in inner.overlay.drain() {
            match record {
                OverlayRecord::Add(value) => self.cache.insert(cell, value),
                OverlayRecord::Remove => self.cache.remove(&cell),
            }
        }

        Ok(())
    }

    /// Discard the overlay with no effect on the committed cache.
    ///
    /// The `retryable` hint comes from the transaction scheduler and does
    /// not change what is discarded. Aborting an already-aborted context
    /// is a no-op; aborting after commit is an error.
    pub fn abort(&self, retryable: bool) -> Result<()> {
        let mut inner = self.inner.write().unwrap();

        match inner.state {
            ContextState::Open => {
                inner.state = ContextState::Aborted;
                debug!(
                    "txn {}: aborting, discarding {} overlay record(s) (retryable: {})",
                    self.txn,
                    inner.overlay.len(),
                    retryable
                );
                inner.overlay.clear();
                Ok(())
            }
            ContextState::Aborted => Ok(()),
            ContextState::Committed => {
                Err(TransactionError::Terminated(self.txn).into())
            }
        }
    }

    fn check_open(&self, inner: &ContextInner) -> Result<()> {
        if inner.state != ContextState::Open {
            return Err(TransactionError::Terminated(self.txn).into());
        }
        Ok(())
    }
}
