//! Watermark comparison for one repository
//!
//! Compares every index record against the tracked packages of a repository and
//! produces the updated repository together with the advances it observed.
//! The input repository is never modified, so a failed run leaves no trace.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::index::types::PackageVersionRecord;
use crate::version::debian::DebianVersion;
use crate::version::error::WatermarkError;

/// A tracked package whose published version moved past its watermark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAdvance {
    pub repository: String,
    pub package: String,
    pub version: String,
}

/// Result of comparing one repository's records against its watermarks
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryComparison {
    /// Repository with raised watermarks
    pub repository: RepositoryConfig,
    /// One entry per tracked package that advanced, carrying its final version
    pub advances: Vec<VersionAdvance>,
}

/// Compare `records` against the watermarks of `repository`
///
/// Records are applied in order against the current in-memory watermark, so when
/// several records match the same tracked package only the highest version
/// survives. Records without a tracked package are ignored, while a tracked
/// package whose watermark cannot be parsed aborts the comparison.
pub fn compare_repository(
    repository: &RepositoryConfig,
    records: &[PackageVersionRecord],
) -> Result<RepositoryComparison, WatermarkError> {
    let mut updated = repository.clone();
    // Keyed by tracked package position so repeated advances collapse into one
    let mut advances: IndexMap<usize, VersionAdvance> = IndexMap::new();

    for record in records {
        for (index, tracked) in updated.packages.iter_mut().enumerate() {
            if !tracked.name.eq_ignore_ascii_case(&record.package) {
                continue;
            }

            let watermark =
                DebianVersion::parse(&tracked.watermark).map_err(|source| {
                    WatermarkError::Invalid {
                        repository: repository.name.clone(),
                        package: tracked.name.clone(),
                        watermark: tracked.watermark.clone(),
                        source,
                    }
                })?;

            if record.version <= watermark {
                debug!(
                    "{}/{}: {} is not newer than {}",
                    repository.name, record.package, record.version, tracked.watermark
                );
                continue;
            }

            let version = record.version.to_string();
            debug!(
                "{}/{}: {} -> {}",
                repository.name, record.package, tracked.watermark, version
            );
            tracked.watermark = version.clone();
            advances.insert(
                index,
                VersionAdvance {
                    repository: repository.name.clone(),
                    package: record.package.clone(),
                    version,
                },
            );
        }
    }

    Ok(RepositoryComparison {
        repository: updated,
        advances: advances.into_values().collect(),
    })
}
