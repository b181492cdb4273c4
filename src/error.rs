//! Run-level error type

use thiserror::Error;

use crate::config::PersistenceError;
use crate::index::error::{FetchError, IndexParseError};
use crate::version::error::WatermarkError;

/// Errors that abort a run before any state is written
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    IndexParse(#[from] IndexParseError),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
