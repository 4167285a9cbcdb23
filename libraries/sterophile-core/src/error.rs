/// Core error types for Sterophile
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Sterophile
#[derive(Error, Debug)]
pub enum CoreError {
    /// A track's id does not match its position in the catalog
    #[error("Track id {id} does not match its catalog position {position}")]
    IdMismatch { id: TrackId, position: usize },

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// The catalog source could not be reached or answered with an error
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
