//! Permission entries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Principal;

/// The decision attached to a permission entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// The action is permitted
    Grant,

    /// The action is refused
    Deny,
}

/// A single entry in a cell's permission set: a principal, an action name,
/// and an access decision.
///
/// Entries are ordered primarily by principal and secondarily by action
/// name, so all entries for one principal are contiguous. The access
/// decision takes no part in ordering or equality: a lookup key built from
/// just `(principal, action)` compares equal to the stored entry whatever
/// decision that entry carries, which lets the resolver find the nearest
/// entry with a single range scan over an ordered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    principal: Principal,
    action: String,
    access: Access,
}

impl PermissionEntry {
    /// Create a new permission entry.
    pub fn new(principal: Principal, action: impl Into<String>, access: Access) -> Self {
        Self {
            principal,
            action: action.into(),
            access,
        }
    }

    /// Build a lookup key for the given principal and action.
    ///
    /// The key's access decision is arbitrary; it is excluded from
    /// ordering and equality.
    pub(crate) fn lookup_key(principal: Principal, action: impl Into<String>) -> Self {
        Self::new(principal, action, Access::Grant)
    }

    /// The principal this entry applies to.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The name of the action this entry covers.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The decision recorded for this principal and action.
    pub fn access(&self) -> Access {
        self.access
    }
}

impl PartialEq for PermissionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.principal == other.principal && self.action == other.action
    }
}

impl Eq for PermissionEntry {}

impl PartialOrd for PermissionEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PermissionEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.principal
            .cmp(&other.principal)
            .then_with(|| self.action.cmp(&other.action))
    }
}

impl Hash for PermissionEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must stay consistent with the access-excluded Eq
        self.principal.hash(state);
        self.action.hash(state);
    }
}

impl fmt::Display for PermissionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {}", self.principal, self.access, self.action)
    }
}
