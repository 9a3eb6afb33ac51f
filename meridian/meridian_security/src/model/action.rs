//! Action hierarchy.
//!
//! An action is a named capability, organized in a parent/child broadening
//! hierarchy: a permission granted for a parent action covers every child
//! that carries no entry of its own. The full action catalog is owned by
//! the surrounding system; this module only models a node and its parent
//! chain.

use std::fmt;
use std::sync::Arc;

/// A named capability in the action forest.
///
/// Each action has at most one parent. Actions are immutable and built
/// leaf-up from already-constructed parents, so a parent chain can never
/// form a cycle.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use meridian_security::model::Action;
///
/// let modify = Arc::new(Action::new("modify"));
/// let move_cell = Action::with_parent("move", modify.clone());
///
/// assert!(modify.parent().is_none());
/// assert_eq!(move_cell.parent().unwrap().name(), "modify");
/// ```
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    parent: Option<Arc<Action>>,
}

impl Action {
    /// Create a top-level action with no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Create an action underneath an existing parent action.
    pub fn with_parent(name: impl Into<String>, parent: Arc<Action>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
        }
    }

    /// The name of this action.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immediately broader action, if any.
    pub fn parent(&self) -> Option<&Arc<Action>> {
        self.parent.as_ref()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
