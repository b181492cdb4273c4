//! Aggregated report of version advances across repositories

use std::fmt;

use indexmap::IndexMap;

use crate::watermark::comparator::VersionAdvance;

/// Advances of one run, grouped by repository and package
///
/// Insertion order is preserved, so rendering is deterministic: repositories
/// appear in processing order and packages in the order they first advanced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    repositories: IndexMap<String, IndexMap<String, String>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an advance; a later advance for the same package replaces the version
    pub fn record(&mut self, advance: VersionAdvance) {
        self.repositories
            .entry(advance.repository)
            .or_default()
            .insert(advance.package, advance.version);
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Total number of advanced packages
    pub fn len(&self) -> usize {
        self.repositories.values().map(IndexMap::len).sum()
    }

    /// Iterate over all advances in rendering order
    pub fn advances(&self) -> impl Iterator<Item = VersionAdvance> + '_ {
        self.repositories.iter().flat_map(|(repository, packages)| {
            packages.iter().map(move |(package, version)| VersionAdvance {
                repository: repository.clone(),
                package: package.clone(),
                version: version.clone(),
            })
        })
    }

    /// Render the report as plain text; empty when nothing advanced
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Extend<VersionAdvance> for Report {
    fn extend<I: IntoIterator<Item = VersionAdvance>>(&mut self, iter: I) {
        for advance in iter {
            self.record(advance);
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (repository, packages) in &self.repositories {
            writeln!(f, "{}:", repository)?;
            for (package, version) in packages {
                writeln!(f, "\t{}: {}", package, version)?;
            }
        }
        Ok(())
    }
}
