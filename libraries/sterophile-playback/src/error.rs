//! Error types for playback control

use sterophile_core::CoreError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Selection or navigation referenced an index outside the catalog
    #[error("Invalid track index {index} (catalog has {len} tracks)")]
    InvalidTrackIndex { index: usize, len: usize },

    /// The audio output has not signalled readiness yet
    #[error("Audio output unavailable")]
    OutputUnavailable,

    /// Track duration metadata has not loaded yet
    #[error("Track duration unknown")]
    DurationUnknown,

    /// Seek input could not be turned into a position
    #[error("Invalid seek target: {0}")]
    InvalidSeekTarget(String),

    /// A session needs at least one track
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// The audio output rejected a command
    #[error("Audio output error: {0}")]
    Output(String),

    /// The playback session task has stopped
    #[error("Playback session closed")]
    SessionClosed,

    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),
}

impl PlaybackError {
    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
