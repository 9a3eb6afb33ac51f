//! # Meridian Security
//!
//! This crate implements the Meridian server's cell-resource authorization
//! cache: the component that decides, for every access to a world object
//! ("cell"), whether a given identity may perform a given action, and that
//! memoizes the expensive derivation of that decision under transactional
//! execution.
//!
//! ## Core Components
//!
//! - **Model**: Principals, the action hierarchy, permission entries, and
//!   the per-cell `CellResource` with its resolution algorithm
//! - **Store**: The committed resource cache and the per-transaction
//!   overlay contexts
//! - **Service**: Lazy resource derivation, negative-result caching, and
//!   the cache mutation API
//! - **Check**: Identity-based request evaluation with an optional audit
//!   trail
//! - **Facade**: The transaction-agnostic API the rest of the server uses
//!
//! ## Usage Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//!
//! use meridian_core::id::{CellId, TransactionId};
//! use meridian_security::model::Principal;
//! use meridian_security::service::{CellResourceService, CellSecurity, CellSecurityLookup};
//! use meridian_security::store::InMemoryVersionStore;
//!
//! struct NoSecurity;
//!
//! impl CellSecurityLookup for NoSecurity {
//!     fn security(&self, _cell: &CellId) -> Option<CellSecurity> {
//!         None
//!     }
//! }
//!
//! let versions = InMemoryVersionStore::new();
//! let service = CellResourceService::new(Arc::new(NoSecurity), &versions).unwrap();
//!
//! let txn = TransactionId::new();
//! let cell = CellId::new();
//!
//! // Give the cell an owner inside the transaction...
//! let owners = [Principal::user("alice")].into_iter().collect();
//! service.update_resource(txn, cell, owners, BTreeSet::new()).unwrap();
//!
//! // ...visible to this transaction immediately, to others after commit
//! assert!(service.get_resource(txn, &cell).unwrap().is_some());
//! service.commit(txn).unwrap();
//! ```

pub mod check;
pub mod facade;
pub mod model;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use check::{AccessAudit, Decision, PrincipalResolver, ResourceChecker};
pub use facade::{CellResourceManager, TransactionProvider};
pub use model::{Access, Action, CellResource, Identity, PermissionEntry, Principal, PrincipalKind};
pub use service::{CellResourceService, CellSecurity, CellSecurityLookup};
pub use store::{CachedResource, InMemoryVersionStore, ResourceCache, ResourceContext, VersionStore};
