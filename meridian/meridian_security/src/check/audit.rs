//! Audit trail of authorization decisions.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use meridian_core::id::CellId;

use crate::model::{Action, Identity};

/// One recorded authorization decision.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// When the decision was made (milliseconds since UNIX epoch)
    pub timestamp: u64,

    /// The username that made the request
    pub username: String,

    /// The requested action
    pub action: String,

    /// Whether the request was granted
    pub granted: bool,
}

impl AuditEntry {
    fn new(identity: &Identity, action: &Action, granted: bool) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            timestamp: now,
            username: identity.username().to_string(),
            action: action.name().to_string(),
            granted,
        }
    }
}

/// A thread-safe, bounded log of authorization decisions, keyed by cell.
pub struct AccessAudit {
    entries: RwLock<HashMap<CellId, Vec<AuditEntry>>>,

    /// Maximum number of entries retained per cell
    max_entries_per_cell: usize,
}

impl AccessAudit {
    /// Create an audit log retaining at most `max_entries_per_cell`
    /// decisions per cell.
    pub fn new(max_entries_per_cell: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_cell,
        }
    }

    /// Record a decision for a cell.
    pub fn record(&self, cell: CellId, identity: &Identity, action: &Action, granted: bool) {
        let entry = AuditEntry::new(identity, action, granted);

        let mut entries = self.entries.write().unwrap();
        let cell_entries = entries.entry(cell).or_default();
        cell_entries.push(entry);

        if cell_entries.len() > self.max_entries_per_cell {
            let excess = cell_entries.len() - self.max_entries_per_cell;
            cell_entries.drain(0..excess);
        }
    }

    /// The recorded decisions for a cell, oldest first.
    pub fn entries(&self, cell: CellId) -> Vec<AuditEntry> {
        self.entries
            .read()
            .unwrap()
            .get(&cell)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop every recorded decision for a cell.
    pub fn clear(&self, cell: CellId) {
        self.entries.write().unwrap().remove(&cell);
    }
}
