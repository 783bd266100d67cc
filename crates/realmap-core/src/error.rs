// crates/realmap-core/src/error.rs
use thiserror::Error;

/// Every failure the store, the query services and the selection logic can
/// report.
///
/// `NotFound` and `Transport` are the two errors a user ever sees, as an
/// "unavailable" info panel. `Validation` never reaches the store: ids and
/// layer types are checked where requests are built.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid request: {0}")]
    Validation(String),

    /// A newer request for the same resource superseded this one.
    #[error("request superseded by a newer one")]
    Cancelled,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

impl GeoError {
    /// `true` for the errors the info panel renders as "unavailable".
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, GeoError::Cancelled)
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for GeoError {
    fn from(e: reqwest::Error) -> Self {
        if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            GeoError::NotFound(e.to_string())
        } else {
            GeoError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
