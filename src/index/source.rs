//! Index source trait for retrieving raw repository indices

#[cfg(test)]
use mockall::automock;

use crate::index::error::FetchError;

/// Raw bytes of one index URL together with what the server said about them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedIndex {
    pub url: String,
    /// Value of the `Content-Type` response header, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Trait for fetching repository indices
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetches the index published at `url`
    ///
    /// # Returns
    /// * `Ok(FetchedIndex)` - Body and content type of a successful response
    /// * `Err(FetchError::NotFound)` - If the server answers 404
    /// * `Err(FetchError)` - For any other failure
    async fn fetch(&self, url: &str) -> Result<FetchedIndex, FetchError>;
}
