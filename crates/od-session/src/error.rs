use od_data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The zone file or the trip table could not be loaded.  There is no
    /// partially loaded session.
    #[error("failed to load: {0}")]
    Load(#[from] DataError),

    #[error("unknown zone {0:?}")]
    UnknownZone(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
