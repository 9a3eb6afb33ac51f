//! The transaction-agnostic resource manager.
//!
//! The rest of the server consumes the authorization cache through this
//! facade; callers never see transaction-context machinery. Every call
//! joins the ambient transaction supplied by the injected
//! [`TransactionProvider`].

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use log::debug;
use meridian_core::error::Result;
use meridian_core::id::{CellId, TransactionId};

use crate::model::{CellResource, PermissionEntry, Principal};
use crate::service::CellResourceService;

/// Supplies the transaction the current operation executes under.
///
/// Implemented over the external transaction scheduler; injected at
/// construction so the facade carries no ambient global state.
pub trait TransactionProvider: Send + Sync {
    /// The id of the transaction currently executing.
    fn current_transaction(&self) -> TransactionId;
}

/// The externally-consumed cell-resource API.
pub struct CellResourceManager {
    service: Arc<CellResourceService>,
    transactions: Arc<dyn TransactionProvider>,
}

impl CellResourceManager {
    /// Create a manager over the service and a transaction provider.
    pub fn new(
        service: Arc<CellResourceService>,
        transactions: Arc<dyn TransactionProvider>,
    ) -> Self {
        Self {
            service,
            transactions,
        }
    }

    /// The authorization resource for a cell.
    ///
    /// `None` means the cell has no security configuration. The manager
    /// imposes no default policy for such cells; whether "unconfigured"
    /// reads as fully open or fully restricted is the caller's contract.
    pub fn get_cell_resource(&self, cell: &CellId) -> Result<Option<Arc<CellResource>>> {
        let txn = self.transactions.current_transaction();
        self.service.get_resource(txn, cell)
    }

    /// Replace (or create) a cell's owner and permission data.
    pub fn update_cell_resource(
        &self,
        cell: CellId,
        owners: HashSet<Principal>,
        permissions: BTreeSet<PermissionEntry>,
    ) -> Result<()> {
        let txn = self.transactions.current_transaction();
        self.service.update_resource(txn, cell, owners, permissions)
    }

    /// Evict a cell's cached resource; the next request re-derives it.
    pub fn invalidate_cell_resource(&self, cell: CellId) -> Result<()> {
        let txn = self.transactions.current_transaction();
        self.service.invalidate_resource(txn, cell)
    }

    /// Cell-lifecycle hook.
    ///
    /// Called when a cell's owner or permission configuration changed
    /// outside the normal update path, for example when the cell was
    /// destroyed or reconfigured by an administrator.
    pub fn cell_security_changed(&self, cell: CellId) -> Result<()> {
        debug!("security configuration changed for cell {}", cell);
        self.invalidate_cell_resource(cell)
    }
}
