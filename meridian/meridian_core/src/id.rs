//! Strongly-typed identifiers for the Meridian server.
//!
//! This module provides the identifier types used throughout the system.
//! Each identifier type is a thin wrapper around a UUID with a phantom
//! type parameter, so identifiers for different entity types cannot be
//! mixed up even though they share the same underlying structure.
//!
//! # Examples
//!
//! ```
//! use meridian_core::id::{CellId, TransactionId};
//! use std::str::FromStr;
//!
//! // Create new random IDs
//! let cell_id = CellId::new();
//! let txn_id = TransactionId::new();
//!
//! // Create from string
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let cell_id = CellId::from_str(id_str).unwrap();
//! assert_eq!(cell_id.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// This is a generic identifier type that is specialized for different
/// entity types using the phantom type parameter `T`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Create an identifier from a specific UUID.
    ///
    /// Useful when reconstructing an identifier with a known UUID, such
    /// as when deserializing from a world file or message.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Create a nil (all zeros) identifier.
    ///
    /// This can be useful as a sentinel or default value.
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Check if this is a nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid == Uuid::nil()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            uuid: Uuid::parse_str(s)?,
            _marker: std::marker::PhantomData,
        })
    }
}

/// Marker type for cells (world objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellMarker;
/// Identifier for a cell.
pub type CellId = Id<CellMarker>;

/// Marker type for transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionMarker;
/// Identifier for a transaction.
pub type TransactionId = Id<TransactionMarker>;
