//! Index parser trait definition

use crate::index::types::PackageVersionRecord;
use crate::version::error::VersionError;

/// Trait for parsing a repository's package listing
pub trait IndexParser: Send + Sync {
    /// Parse the decoded index content and extract package/version records
    fn parse(&self, content: &str) -> Result<Vec<PackageVersionRecord>, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// Line is neither a field, a continuation, a comment nor a separator
    #[error("Invalid syntax at line {line}: {content:?}")]
    InvalidSyntax { line: usize, content: String },

    /// Continuation line with no field to continue
    #[error("Continuation line without a field at line {line}")]
    DanglingContinuation { line: usize },

    /// Stanza lacks a mandatory field
    #[error("Stanza starting at line {line} has no {field} field")]
    MissingField { field: &'static str, line: usize },

    /// Version field cannot be parsed
    #[error("Invalid version at line {line}: {source}")]
    InvalidVersion {
        line: usize,
        #[source]
        source: VersionError,
    },
}
