use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid epoch in version: {0}")]
    InvalidEpoch(String),

    #[error("Invalid upstream version: {0}")]
    InvalidUpstream(String),

    #[error("Invalid revision in version: {0}")]
    InvalidRevision(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatermarkError {
    #[error("Invalid watermark {watermark:?} for {repository}/{package}: {source}")]
    Invalid {
        repository: String,
        package: String,
        watermark: String,
        #[source]
        source: VersionError,
    },
}
