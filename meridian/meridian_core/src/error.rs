//! Error types for the Meridian server.
//!
//! This module defines the error hierarchy used throughout the system.
//! Errors are organized by subsystem, with each subsystem having its own
//! error type. The root `Error` type can wrap any of the subsystem-specific
//! errors, allowing for uniform error handling at the top level.

use crate::id::TransactionId;
use crate::utils::SchemaVersion;
use thiserror::Error;

/// Root error type for the Meridian system.
#[derive(Debug, Error)]
pub enum Error {
    /// Security subsystem errors
    #[error("Security error: {0}")]
    Security(#[from] SecurityError),

    /// Transaction lifecycle errors
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// General runtime errors
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Errors related to the security service.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// The persisted schema version cannot be used by this service.
    ///
    /// There is no migration path; the service refuses to start rather
    /// than reinterpreting incompatible cached data.
    #[error("unable to convert version {persisted} to current version {current}")]
    VersionMismatch {
        /// Version found in the persistent store
        persisted: SchemaVersion,

        /// Version this service was built against
        current: SchemaVersion,
    },

    /// The persistent version store could not be read or written
    #[error("Version store failure: {0}")]
    VersionStore(String),
}

/// Errors related to transaction-scoped cache contexts.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Commit or abort was requested for a transaction with no live context
    #[error("Transaction not joined: {0}")]
    NotJoined(TransactionId),

    /// An operation was attempted on a committed or aborted context
    #[error("Transaction already terminated: {0}")]
    Terminated(TransactionId),
}

/// Result type used throughout the Meridian system.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let txn_err = TransactionError::NotJoined(TransactionId::new());
        let error: Error = txn_err.into();
        assert!(matches!(error, Error::Transaction(_)));

        let sec_err = SecurityError::VersionStore("store offline".to_string());
        let error: Error = sec_err.into();
        assert!(matches!(error, Error::Security(_)));
    }

    #[test]
    fn test_error_display() {
        let txn = TransactionId::new();
        let error: Error = TransactionError::Terminated(txn).into();
        let display = format!("{}", error);
        assert!(display.contains(&format!("Transaction already terminated: {}", txn)));
    }

    #[test]
    fn test_version_mismatch_display() {
        let error: Error = SecurityError::VersionMismatch {
            persisted: SchemaVersion::new(2, 0),
            current: SchemaVersion::new(1, 0),
        }
        .into();
        let display = format!("{}", error);
        assert!(display.contains("unable to convert version 2.0 to current version 1.0"));
    }
}
