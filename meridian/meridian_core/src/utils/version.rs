//! Schema-version utilities.
//!
//! This module defines the major/minor version marker that services persist
//! alongside their cached data. A service checks the persisted marker at
//! startup and refuses to start when the marker is incompatible with the
//! version it was built against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error parsing a schema-version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError {
    /// The invalid version string.
    pub version: String,

    /// The reason for the error.
    pub reason: String,
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid version '{}': {}", self.version, self.reason)
    }
}

impl std::error::Error for VersionParseError {}

/// A persisted major/minor schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version number.
    pub major: u32,

    /// Minor version number.
    pub minor: u32,
}

impl SchemaVersion {
    /// Create a new schema version.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Check whether data persisted under this version can be used by a
    /// service built against `current`.
    ///
    /// Versions are compatible when the major numbers match and the
    /// persisted minor number is not newer than the current one. Anything
    /// else has no defined migration path.
    pub fn is_compatible_with(&self, current: &SchemaVersion) -> bool {
        self.major == current.major && self.minor <= current.minor
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: &str| VersionParseError {
            version: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.splitn(2, '.');

        let major = parts
            .next()
            .ok_or_else(|| error("Missing major version"))?
            .parse()
            .map_err(|_| error("Invalid major version"))?;

        let minor = parts
            .next()
            .ok_or_else(|| error("Missing minor version"))?
            .parse()
            .map_err(|_| error("Invalid minor version"))?;

        Ok(Self { major, minor })
    }
}
