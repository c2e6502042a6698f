//! Load-subsystem error type.
//!
//! Only whole-file failures are errors.  Individual bad features or rows are
//! dropped and counted in [`LoadReport`](crate::LoadReport) instead.

use thiserror::Error;

/// Errors produced by `od-data`.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("zone source is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,
}

pub type DataResult<T> = Result<T, DataError>;
