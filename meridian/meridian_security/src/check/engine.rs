//! Request evaluation against a resource.

use std::collections::HashSet;
use std::sync::Arc;

use super::AccessAudit;
use crate::model::{Access, Action, CellResource, Identity, Principal};

/// The outcome of a non-blocking authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The identity may perform the action
    Grant,

    /// The identity may not perform the action
    Deny,

    /// Principal resolution is still pending; retry once it completes.
    /// Never to be treated as a deny.
    Schedule,
}

/// Resolution of an authenticated identity to its principal set.
///
/// An identity maps to the user's own principal plus group memberships.
/// The lookup may be served by a remote directory, so it comes in two
/// distinct operations rather than one flag-switched signature: a
/// non-blocking query that can report "not yet available", and a blocking
/// query that forces resolution to completion.
pub trait PrincipalResolver: Send + Sync {
    /// The identity's principals, or `None` when resolution has not
    /// completed yet.
    fn try_principals(&self, identity: &Identity) -> Option<HashSet<Principal>>;

    /// The identity's principals, waiting for resolution to complete.
    /// An unknown identity resolves to an empty set.
    fn principals_blocking(&self, identity: &Identity) -> HashSet<Principal>;
}

/// Evaluates authorization requests for identities against resources.
///
/// The checker pairs a resource's pure resolution algorithm with the
/// identity-to-principals lookup, and optionally records every decision in
/// an [`AccessAudit`].
pub struct ResourceChecker {
    resolver: Arc<dyn PrincipalResolver>,
    audit: Option<Arc<AccessAudit>>,
}

impl ResourceChecker {
    /// Create a checker over the given principal resolver.
    pub fn new(resolver: Arc<dyn PrincipalResolver>) -> Self {
        Self {
            resolver,
            audit: None,
        }
    }

    /// Create a checker that records decisions in the given audit log.
    pub fn with_audit(resolver: Arc<dyn PrincipalResolver>, audit: Arc<AccessAudit>) -> Self {
        Self {
            resolver,
            audit: Some(audit),
        }
    }

    /// Decide whether `identity` may perform `action` on `resource`,
    /// without blocking.
    ///
    /// When the identity's principals are not yet resolvable the result is
    /// [`Decision::Schedule`]: the caller retries once resolution
    /// completes instead of receiving a guessed answer.
    pub fn request(
        &self,
        identity: &Identity,
        action: &Action,
        resource: &CellResource,
    ) -> Decision {
        let Some(principals) = self.resolver.try_principals(identity) else {
            return Decision::Schedule;
        };

        match self.evaluate(identity, action, resource, &principals) {
            Access::Grant => Decision::Grant,
            Access::Deny => Decision::Deny,
        }
    }

    /// Decide whether `identity` may perform `action` on `resource`,
    /// forcing principal resolution to completion first.
    pub fn request_blocking(
        &self,
        identity: &Identity,
        action: &Action,
        resource: &CellResource,
    ) -> bool {
        let principals = self.resolver.principals_blocking(identity);
        self.evaluate(identity, action, resource, &principals) == Access::Grant
    }

    /// The audit log, if one is configured.
    pub fn audit(&self) -> Option<&Arc<AccessAudit>> {
        self.audit.as_ref()
    }

    fn evaluate(
        &self,
        identity: &Identity,
        action: &Action,
        resource: &CellResource,
        principals: &HashSet<Principal>,
    ) -> Access {
        let access = resource.resolve(principals, action);

        if let Some(audit) = &self.audit {
            audit.record(resource.cell(), identity, action, access == Access::Grant);
        }

        access
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PermissionEntry;
    use meridian_core::id::CellId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// A resolver whose identities can be marked pending.
    struct MapResolver {
        resolved: RwLock<HashMap<String, HashSet<Principal>>>,
    }

    impl MapResolver {
        fn new() -> Self {
            Self {
                resolved: RwLock::new(HashMap::new()),
            }
        }

        fn insert(&self, username: &str, principals: impl IntoIterator<Item = Principal>) {
            self.resolved
                .write()
                .unwrap()
                .insert(username.to_string(), principals.into_iter().collect());
        }
    }

    impl PrincipalResolver for MapResolver {
        fn try_principals(&self, identity: &Identity) -> Option<HashSet<Principal>> {
            self.resolved.read().unwrap().get(identity.username()).cloned()
        }

        fn principals_blocking(&self, identity: &Identity) -> HashSet<Principal> {
            self.try_principals(identity).unwrap_or_default()
        }
    }

    fn viewable_by(principal: Principal) -> CellResource {
        CellResource::new(
            CellId::new(),
            HashSet::new(),
            [PermissionEntry::new(principal, "view", Access::Grant)]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn test_pending_resolution_schedules() {
        let resolver = Arc::new(MapResolver::new());
        let checker = ResourceChecker::new(resolver.clone());
        let resource = viewable_by(Principal::user("alice"));
        let identity = Identity::new("alice");
        let view = Action::new("view");

        // Unresolved: retry later, not a deny
        assert_eq!(
            checker.request(&identity, &view, &resource),
            Decision::Schedule
        );

        resolver.insert("alice", [Principal::user("alice")]);
        assert_eq!(checker.request(&identity, &view, &resource), Decision::Grant);
    }

    #[test]
    fn test_blocking_collapses_to_bool() {
        let resolver = Arc::new(MapResolver::new());
        resolver.insert("alice", [Principal::user("alice")]);
        let checker = ResourceChecker::new(resolver);
        let resource = viewable_by(Principal::user("alice"));
        let view = Action::new("view");

        assert!(checker.request_blocking(&Identity::new("alice"), &view, &resource));

        // An unknown identity resolves to no principals, which is a deny
        assert!(!checker.request_blocking(&Identity::new("mallory"), &view, &resource));
    }

    #[test]
    fn test_group_membership_grants() {
        let resolver = Arc::new(MapResolver::new());
        resolver.insert(
            "bob",
            [Principal::user("bob"), Principal::group("staff")],
        );
        let checker = ResourceChecker::new(resolver);
        let resource = viewable_by(Principal::group("staff"));

        assert_eq!(
            checker.request(&Identity::new("bob"), &Action::new("view"), &resource),
            Decision::Grant
        );
    }

    #[test]
    fn test_decisions_are_audited() {
        let resolver = Arc::new(MapResolver::new());
        resolver.insert("alice", [Principal::user("alice")]);
        resolver.insert("mallory", [Principal::user("mallory")]);

        let audit = Arc::new(AccessAudit::new(16));
        let checker = ResourceChecker::with_audit(resolver, audit.clone());
        let resource = viewable_by(Principal::user("alice"));
        let view = Action::new("view");

        checker.request(&Identity::new("alice"), &view, &resource);
        checker.request(&Identity::new("mallory"), &view, &resource);

        let entries = audit.entries(resource.cell());
        assert_eq!(entries.len(), 2);
        assert!(entries[0].granted);
        assert_eq!(entries[0].username, "alice");
        assert!(!entries[1].granted);
    }
}
