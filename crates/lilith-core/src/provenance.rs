//! Version descriptors printed into every output document.

use serde::{Deserialize, Serialize};

/// Database version recorded when the caller does not know it.
pub const UNKNOWN_DB_VERSION: &str = "unknown";

/// Version strings of the tool and of the experimental database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVersions {
    /// Lilith release that produced the output.
    pub lilith: String,
    /// Identifier of the experimental database the results were computed against.
    pub dbversion: String,
}

impl ToolVersions {
    /// Creates a descriptor from explicit version strings.
    pub fn new(lilith: impl Into<String>, dbversion: impl Into<String>) -> Self {
        Self {
            lilith: lilith.into(),
            dbversion: dbversion.into(),
        }
    }

    /// Uses the version of this crate as the tool version.
    pub fn current(dbversion: impl Into<String>) -> Self {
        Self::new(env!("CARGO_PKG_VERSION"), dbversion)
    }
}

impl Default for ToolVersions {
    fn default() -> Self {
        Self::current(UNKNOWN_DB_VERSION)
    }
}
