//! Per-cell authorization resources.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use meridian_core::id::CellId;

use super::{Access, Action, PermissionEntry, Principal};

/// The authorization object for one cell: an owner set plus an ordered set
/// of permission entries.
///
/// A `CellResource` is an immutable value snapshot. Updating a cell's
/// security configuration always builds a new resource and replaces the
/// cache entry wholesale; an instance already handed out keeps answering
/// from the data it was built with.
#[derive(Debug, Clone)]
pub struct CellResource {
    cell: CellId,
    owners: HashSet<Principal>,
    permissions: BTreeSet<PermissionEntry>,
}

impl CellResource {
    /// Create a resource snapshot from a cell's owner and permission data.
    pub fn new(
        cell: CellId,
        owners: HashSet<Principal>,
        permissions: BTreeSet<PermissionEntry>,
    ) -> Self {
        Self {
            cell,
            owners,
            permissions,
        }
    }

    /// The cell this resource guards.
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// A stable resource identifier derived from the cell id.
    pub fn resource_id(&self) -> String {
        format!("cell-resource-{}", self.cell)
    }

    /// The principals that own the cell.
    pub fn owners(&self) -> &HashSet<Principal> {
        &self.owners
    }

    /// The cell's permission entries.
    pub fn permissions(&self) -> &BTreeSet<PermissionEntry> {
        &self.permissions
    }

    /// Decide whether any of the given principals may perform `action`.
    ///
    /// Owners bypass explicit permission entries entirely. For everyone
    /// else the permission set is consulted for an exact entry, walking up
    /// the action's parent chain when no entry exists; a top-level action
    /// with no entry is denied. A grant for any principal short-circuits
    /// the whole request to [`Access::Grant`], so an empty principal set
    /// always resolves to [`Access::Deny`].
    pub fn resolve(&self, principals: &HashSet<Principal>, action: &Action) -> Access {
        for principal in principals {
            if self.owners.contains(principal) {
                return Access::Grant;
            }

            if self.resolve_for_principal(principal, action) == Access::Grant {
                return Access::Grant;
            }
        }

        // No principal was granted the action
        Access::Deny
    }

    /// Decide one principal's access to `action`.
    ///
    /// The ordered permission set is range-scanned from a `(principal,
    /// action)` lookup key; the first element of that tail is the entry
    /// itself when one exists, because the access decision takes no part
    /// in entry ordering. When no entry exists the search recurses on the
    /// parent action; a top-level miss is a deny.
    fn resolve_for_principal(&self, principal: &Principal, action: &Action) -> Access {
        let key = PermissionEntry::lookup_key(principal.clone(), action.name());

        if let Some(entry) = self.permissions.range(key.clone()..).next() {
            if *entry == key {
                return entry.access();
            }
        }

        match action.parent() {
            Some(parent) => self.resolve_for_principal(principal, parent),
            None => Access::Deny,
        }
    }
}

impl fmt::Display for CellResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn identity_principals(principal: Principal) -> HashSet<Principal> {
        [principal].into_iter().collect()
    }

    fn resource(
        owners: impl IntoIterator<Item = Principal>,
        permissions: impl IntoIterator<Item = PermissionEntry>,
    ) -> CellResource {
        CellResource::new(
            CellId::new(),
            owners.into_iter().collect(),
            permissions.into_iter().collect(),
        )
    }

    #[test]
    fn test_owner_bypasses_permissions() {
        let alice = Principal::user("alice");
        let rsrc = resource([alice.clone()], []);
        let action = Action::new("view");

        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &action),
            Access::Grant
        );
    }

    #[test]
    fn test_owner_bypasses_explicit_deny() {
        let alice = Principal::user("alice");
        let rsrc = resource(
            [alice.clone()],
            [PermissionEntry::new(alice.clone(), "view", Access::Deny)],
        );

        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &Action::new("view")),
            Access::Grant
        );
    }

    #[test]
    fn test_default_deny() {
        let rsrc = resource([], []);
        let action = Action::new("view");

        assert_eq!(
            rsrc.resolve(&identity_principals(Principal::user("alice")), &action),
            Access::Deny
        );
    }

    #[test]
    fn test_empty_principal_set_denied() {
        let rsrc = resource([Principal::user("alice")], []);
        assert_eq!(
            rsrc.resolve(&HashSet::new(), &Action::new("view")),
            Access::Deny
        );
    }

    #[test]
    fn test_exact_entry_wins() {
        let alice = Principal::user("alice");
        let rsrc = resource(
            [],
            [PermissionEntry::new(alice.clone(), "view", Access::Grant)],
        );

        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &Action::new("view")),
            Access::Grant
        );
    }

    #[test]
    fn test_parent_fallback() {
        let alice = Principal::user("alice");
        let parent = Arc::new(Action::new("modify"));
        let child = Action::with_parent("move", parent.clone());

        let rsrc = resource(
            [],
            [PermissionEntry::new(alice.clone(), "modify", Access::Grant)],
        );

        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &child),
            Access::Grant
        );
    }

    #[test]
    fn test_exact_match_precedence_over_parent() {
        let alice = Principal::user("alice");
        let parent = Arc::new(Action::new("modify"));
        let child = Action::with_parent("move", parent.clone());

        let rsrc = resource(
            [],
            [
                PermissionEntry::new(alice.clone(), "move", Access::Deny),
                PermissionEntry::new(alice.clone(), "modify", Access::Grant),
            ],
        );

        assert_eq!(
            rsrc.resolve(&identity_principals(alice.clone()), &child),
            Access::Deny
        );

        // The parent itself is still granted
        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &parent),
            Access::Grant
        );
    }

    #[test]
    fn test_grant_short_circuits_across_principals() {
        let alice = Principal::user("alice");
        let staff = Principal::group("staff");

        let rsrc = resource(
            [],
            [
                PermissionEntry::new(alice.clone(), "view", Access::Deny),
                PermissionEntry::new(staff.clone(), "view", Access::Grant),
            ],
        );

        let principals: HashSet<Principal> = [alice, staff].into_iter().collect();
        assert_eq!(rsrc.resolve(&principals, &Action::new("view")), Access::Grant);
    }

    #[test]
    fn test_neighbor_entries_do_not_match() {
        // The range scan must not mistake the lexicographically next entry
        // for an exact match.
        let alice = Principal::user("alice");
        let rsrc = resource(
            [],
            [PermissionEntry::new(alice.clone(), "view", Access::Grant)],
        );

        assert_eq!(
            rsrc.resolve(&identity_principals(alice), &Action::new("modify")),
            Access::Deny
        );
    }

    #[test]
    fn test_resource_id_is_stable() {
        let cell = CellId::new();
        let rsrc = CellResource::new(cell, HashSet::new(), BTreeSet::new());
        assert_eq!(rsrc.resource_id(), format!("cell-resource-{}", cell));
    }
}
