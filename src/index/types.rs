//! Common types for repository indices

use crate::version::debian::DebianVersion;

/// A package and the version it is currently published at, as found in one index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionRecord {
    /// Package name exactly as it appears in the index
    pub package: String,
    /// Published version
    pub version: DebianVersion,
}

impl PackageVersionRecord {
    pub fn new(package: impl Into<String>, version: DebianVersion) -> Self {
        Self {
            package: package.into(),
            version,
        }
    }
}
