//! Sterophile - Playback Control
//!
//! Session-scoped playback controller for Sterophile.
//!
//! This crate provides:
//! - Track selection by catalog index
//! - Play / pause with a synchronously maintained `is_playing` flag
//! - Cyclic `next` (wraps to the first track) and clamped `previous`
//!   (stays on the first track)
//! - Seek by ratio of the seek bar, or by raw click offset
//! - Elapsed/total time and seek-bar fill derived from progress ticks
//!
//! # Architecture
//!
//! `sterophile-playback` never talks to an audio device directly. The
//! platform supplies an [`AudioOutput`] implementation together with an
//! [`OutputLink`]: a one-shot readiness signal plus a stream of
//! [`OutputEvent`]s (time updates, track ended, errors).
//!
//! [`PlaybackController`] is the synchronous state machine. It is usable on
//! its own, but most callers run it inside a [`PlaybackSession`], which owns
//! the controller on a single task, queues commands until the output is
//! ready, and hands out a cloneable [`PlaybackHandle`].
//!
//! # Example: Controller
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sterophile_core::{Catalog, Track, TrackId};
//! use sterophile_playback::{AudioOutput, PlaybackConfig, PlaybackController, Result};
//!
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn load(&mut self, _track: &Track) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_position(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn duration(&self) -> Option<Duration> { Some(Duration::from_secs(150)) }
//! }
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     Track::new(0, "A", "X", "a.jpg", "a.mp3"),
//!     Track::new(1, "B", "X", "b.jpg", "b.mp3"),
//! ]).unwrap());
//!
//! let mut controller =
//!     PlaybackController::new(catalog, SilentOutput, PlaybackConfig::default()).unwrap();
//! controller.on_output_ready().unwrap();
//!
//! controller.next().unwrap();
//! assert_eq!(controller.current_index(), TrackId::new(1));
//! assert!(controller.is_playing());
//!
//! controller.on_progress_tick(75.0, Some(150.0));
//! assert_eq!(controller.elapsed().to_string(), "1:15");
//! assert_eq!(controller.fill_percent(), 50);
//! ```

mod controller;
mod error;
mod events;
mod output;
mod session;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{output_link, AudioOutput, OutputEvent, OutputLink, OutputNotifier};
pub use session::{PlaybackHandle, PlaybackSession};
pub use types::{
    PlaybackConfig, PlaybackSnapshot, PlaybackState, PlaybackStatus, SeekPolicy, Timestamp,
};
