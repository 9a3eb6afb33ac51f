//! # Meridian Core
//!
//! `meridian_core` provides the fundamental building blocks shared by the
//! Meridian virtual-world server components: error types, strongly-typed
//! identifiers, and schema-version utilities.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for the Meridian subsystems
//! - **id**: Strongly-typed identifier types
//! - **utils**: Schema-version helpers

pub mod error;
pub mod id;
pub mod utils;

// Re-export key types for convenience
pub use error::{Error, Result, SecurityError, TransactionError};
pub use id::{CellId, TransactionId};
pub use utils::SchemaVersion;
