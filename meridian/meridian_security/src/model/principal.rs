//! Principals and identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of subject a principal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrincipalKind {
    /// A single user
    User,

    /// A group of users
    Group,
}

/// An authorization subject: a user or a group.
///
/// Principals are the subjects of permission entries and of resource
/// ownership. They are ordered by name first so that every entry for one
/// principal is contiguous in an ordered permission set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal {
    name: String,
    kind: PrincipalKind,
}

impl Principal {
    /// Create a user principal.
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PrincipalKind::User,
        }
    }

    /// Create a group principal.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PrincipalKind::Group,
        }
    }

    /// The principal's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of subject this principal names.
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PrincipalKind::User => write!(f, "user:{}", self.name),
            PrincipalKind::Group => write!(f, "group:{}", self.name),
        }
    }
}

/// An authenticated identity.
///
/// An identity maps to one or more principals (the user itself plus group
/// memberships) through an external lookup that may not yet be resolved;
/// see [`crate::check::PrincipalResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    username: String,
}

impl Identity {
    /// Create an identity for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The authenticated username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_ordering_groups_by_name() {
        let mut principals = vec![
            Principal::group("staff"),
            Principal::user("alice"),
            Principal::user("staff"),
            Principal::user("bob"),
        ];
        principals.sort();

        let names: Vec<&str> = principals.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["alice", "bob", "staff", "staff"]);

        // Same name sorts user before group deterministically
        assert_eq!(principals[2].kind(), PrincipalKind::User);
        assert_eq!(principals[3].kind(), PrincipalKind::Group);
    }

    #[test]
    fn test_display() {
        assert_eq!(Principal::user("alice").to_string(), "user:alice");
        assert_eq!(Principal::group("staff").to_string(), "group:staff");
        assert_eq!(Identity::new("alice").to_string(), "alice");
    }
}
