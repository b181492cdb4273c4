use thiserror::Error;

use crate::index::parser::ParseError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Remote URL not found: {0}")]
    NotFound(String),

    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Why a fetched index could not be turned into records
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("gzip decompression failed: {0}")]
    Gzip(#[source] std::io::Error),

    #[error("index is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
#[error("Failed to parse URL={url}: {source}")]
pub struct IndexParseError {
    pub url: String,
    #[source]
    pub source: DecodeError,
}
