//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! controller and drained by the session, which broadcasts them:
//! - State changes (play/pause)
//! - Track changes (select, next, previous, auto-advance)
//! - Progress updates (one per applied progress tick)
//! - Seeks issued to the output

use crate::types::{PlaybackStatus, Timestamp};
use serde::{Deserialize, Serialize};
use sterophile_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// The audio output signalled readiness and the first track was loaded
    OutputReady,

    /// Playback status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A different catalog entry became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the track that was current before
        previous_track_id: TrackId,
    },

    /// Elapsed/total time recomputed from a progress tick
    Progress {
        /// Elapsed time
        elapsed: Timestamp,
        /// Total duration
        total: Timestamp,
        /// Seek-bar fill, 0-100
        fill_percent: u8,
    },

    /// The output was told to jump to a position
    Seeked {
        /// Target position in milliseconds
        position_ms: u64,
    },

    /// The output reported an error or rejected a command
    Error {
        /// Error message
        message: String,
    },
}
