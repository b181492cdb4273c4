//! Watermark comparison and reporting
//!
//! - [`comparator`]: per-repository comparison of index records against watermarks
//! - [`report`]: aggregation of advances and text rendering

pub mod comparator;
pub mod report;

pub use comparator::{RepositoryComparison, VersionAdvance, compare_repository};
pub use report::Report;
