//! HTTP(S) index source

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::index::error::FetchError;
use crate::index::source::{FetchedIndex, IndexSource};

/// Index source backed by a reqwest client
pub struct HttpIndexSource {
    client: reqwest::Client,
}

impl HttpIndexSource {
    /// Creates a client honoring the configured timeouts and certificate trust policy
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate validation is disabled for repository fetches");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("debwatch/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl IndexSource for HttpIndexSource {
    async fn fetch(&self, url: &str) -> Result<FetchedIndex, FetchError> {
        let network_error = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            warn!("Repository returned status {}: {}", status, url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(network_error)?;
        debug!(
            "Fetched {} bytes from {} (content-type: {:?})",
            body.len(),
            url,
            content_type
        );

        Ok(FetchedIndex {
            url: url.to_string(),
            content_type,
            body: body.to_vec(),
        })
    }
}
