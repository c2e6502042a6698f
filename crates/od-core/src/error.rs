//! Shared error type.
//!
//! Sub-crates define their own error enums (`DataError`, `SessionError`,
//! `OutputError`) and wrap `OdError` as one variant where they need it.

use thiserror::Error;

/// The top-level error type for `od-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum OdError {
    #[error("hour {0} is outside 0..=23")]
    InvalidHour(u8),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `od-*` crates.
pub type OdResult<T> = Result<T, OdError>;
