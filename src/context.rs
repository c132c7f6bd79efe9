//! Per-request credential context

use std::collections::HashSet;

/// A capability requested on a storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Privilege {
    /// Read object data and list prefixes
    Read,
    /// Write, overwrite, and delete objects
    Write,
}

/// Caller-supplied description of the access being requested.
///
/// Built once per request and never persisted. `storage_base` is the exact
/// registry key for the storage configuration (typically a bucket
/// identifier); `locations` are the specific paths the caller intends to
/// touch and become the outer bound of any vended policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialContext {
    /// Registry key for the storage configuration
    pub storage_base: String,
    /// Requested capabilities
    pub privileges: HashSet<Privilege>,
    /// Storage paths the caller intends to access
    pub locations: HashSet<String>,
}

impl CredentialContext {
    /// Create a new context with explicit privileges.
    pub fn new(
        storage_base: impl Into<String>,
        privileges: impl IntoIterator<Item = Privilege>,
        locations: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            storage_base: storage_base.into(),
            privileges: privileges.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    /// Create a read-only context.
    pub fn for_read(
        storage_base: impl Into<String>,
        locations: impl IntoIterator<Item = String>,
    ) -> Self {
        Self::new(storage_base, [Privilege::Read], locations)
    }

    /// Create a read-write context.
    pub fn for_write(
        storage_base: impl Into<String>,
        locations: impl IntoIterator<Item = String>,
    ) -> Self {
        Self::new(storage_base, [Privilege::Read, Privilege::Write], locations)
    }
}
