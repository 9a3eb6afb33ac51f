//! Utility types shared across the Meridian components.

pub mod version;

pub use version::{SchemaVersion, VersionParseError};
