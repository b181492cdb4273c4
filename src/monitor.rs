//! Fetch-and-compare coordinator
//!
//! Groups the index source and index parser that together turn a repository's
//! URLs into records, and runs the watermark comparison over every configured
//! repository.

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, RepositoryConfig};
use crate::error::MonitorError;
use crate::index::decoder::decode_index;
use crate::index::parser::IndexParser;
use crate::index::source::IndexSource;
use crate::index::types::PackageVersionRecord;
use crate::watermark::{Report, compare_repository};

/// Outcome of checking every repository of a configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Configuration with raised watermarks
    pub config: Config,
    pub report: Report,
}

pub struct Monitor {
    source: Arc<dyn IndexSource>,
    parser: Arc<dyn IndexParser>,
}

impl Monitor {
    pub fn new(source: Arc<dyn IndexSource>, parser: Arc<dyn IndexParser>) -> Self {
        Self { source, parser }
    }

    /// Fetch and decode every index URL of a repository, in order
    ///
    /// The first failing URL aborts the repository; no partial record set is returned.
    pub async fn fetch_records(
        &self,
        urls: &[String],
    ) -> Result<Vec<PackageVersionRecord>, MonitorError> {
        let mut records = Vec::new();

        for url in urls {
            let fetched = self.source.fetch(url).await?;
            let index = decode_index(&fetched, self.parser.as_ref())?;
            info!("Parsed {} packages from {}", index.len(), url);
            records.extend(index);
        }

        Ok(records)
    }

    /// Compare one repository against its freshly fetched indices
    pub async fn check_repository(
        &self,
        repository: &RepositoryConfig,
        report: &mut Report,
    ) -> Result<RepositoryConfig, MonitorError> {
        let records = self.fetch_records(&repository.urls).await?;
        let comparison = compare_repository(repository, &records)?;

        info!(
            "Repository {}: {} records, {} advanced",
            repository.name,
            records.len(),
            comparison.advances.len()
        );
        report.extend(comparison.advances);

        Ok(comparison.repository)
    }

    /// Check every repository sequentially, stopping at the first error
    ///
    /// `config` is left untouched; the raised watermarks are returned in the outcome.
    pub async fn check(&self, config: &Config) -> Result<CheckOutcome, MonitorError> {
        let mut report = Report::new();
        let mut repositories = Vec::with_capacity(config.repo.len());

        for repository in &config.repo {
            repositories.push(self.check_repository(repository, &mut report).await?);
        }

        Ok(CheckOutcome {
            config: Config {
                repo: repositories,
                ..config.clone()
            },
            report,
        })
    }
}
