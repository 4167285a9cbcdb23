//! Playback controller - the session's single owner of playback state
//!
//! Tracks what is playing and how far along it is, and is the only
//! component that commands the audio output.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::AudioOutput,
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState, PlaybackStatus, SeekPolicy, Timestamp},
};
use std::sync::Arc;
use std::time::Duration;
use sterophile_core::{Catalog, Track, TrackId};
use tracing::{debug, info, trace, warn};

/// Synchronous playback state machine
///
/// States are Paused and Playing. The session starts Paused on the first
/// catalog entry; there is no terminal state.
///
/// Navigation is deliberately asymmetric: `next` wraps from the last entry
/// to the first, `previous` stops at the first entry.
pub struct PlaybackController<O: AudioOutput> {
    catalog: Arc<Catalog>,
    output: O,
    output_ready: bool,

    current: usize,
    is_playing: bool,
    elapsed: Timestamp,
    total: Timestamp,
    fill_percent: u8,

    seek_policy: SeekPolicy,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create a controller positioned on the first catalog entry, paused
    pub fn new(catalog: Arc<Catalog>, output: O, config: PlaybackConfig) -> Result<Self> {
        if catalog.is_empty() {
            return Err(PlaybackError::EmptyCatalog);
        }

        Ok(Self {
            catalog,
            output,
            output_ready: false,
            current: 0,
            is_playing: false,
            elapsed: Timestamp::ZERO,
            total: Timestamp::ZERO,
            fill_percent: 0,
            seek_policy: config.seek_policy,
            pending_events: Vec::new(),
        })
    }

    // ===== Output lifecycle =====

    /// Mark the output as ready and load the current track into it
    ///
    /// Calling this again is a no-op. If the first load fails the output
    /// stays unavailable and no `OutputReady` event is emitted.
    pub fn on_output_ready(&mut self) -> Result<()> {
        if self.output_ready {
            return Ok(());
        }

        let track = &self.catalog.tracks()[self.current];
        if let Err(e) = self.output.load(track) {
            self.emit_error(e.to_string());
            return Err(e);
        }

        self.output_ready = true;
        self.pending_events.push(PlaybackEvent::OutputReady);
        info!(track_id = %self.current_index(), "Audio output ready");
        Ok(())
    }

    /// Whether the output has signalled readiness
    pub fn is_output_ready(&self) -> bool {
        self.output_ready
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.output_ready {
            Ok(())
        } else {
            Err(PlaybackError::OutputUnavailable)
        }
    }

    // ===== Playback Control =====

    /// Make `id` the current track and start playing it
    ///
    /// An id outside the catalog fails with `InvalidTrackIndex` and leaves
    /// every piece of state untouched. Selecting the current track keeps
    /// its position and only resumes it.
    pub fn select_and_play(&mut self, id: TrackId) -> Result<()> {
        let index = id.index();
        if index >= self.catalog.len() {
            return Err(PlaybackError::InvalidTrackIndex {
                index,
                len: self.catalog.len(),
            });
        }
        self.ensure_ready()?;

        self.play_index(index)
    }

    /// Resume output on the current track
    ///
    /// Already playing: nothing is sent to the output.
    pub fn play(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if self.is_playing {
            trace!("Play ignored, already playing");
            return Ok(());
        }

        self.start_output()
    }

    /// Stop output on the current track
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_ready()?;
        if !self.is_playing {
            trace!("Pause ignored, already paused");
            return Ok(());
        }

        self.output.pause()?;
        self.set_playing(false);
        Ok(())
    }

    /// Advance to `(index + 1) mod N` and play
    ///
    /// Past the last entry this always wraps to the first. With a single
    /// track that is the current one, which just resumes.
    pub fn next(&mut self) -> Result<()> {
        self.ensure_ready()?;

        let next = (self.current + 1) % self.catalog.len();
        self.play_index(next)
    }

    /// Step back one entry and play
    ///
    /// On the first entry this does nothing: no wrap, no play.
    pub fn previous(&mut self) -> Result<()> {
        self.ensure_ready()?;

        if self.current == 0 {
            debug!("Previous ignored on first track");
            return Ok(());
        }

        self.switch_to(self.current - 1)?;
        self.start_output()
    }

    /// Called when the output reports the end of the track
    ///
    /// A single-track catalog rewinds and replays its only track.
    pub fn on_track_ended(&mut self) -> Result<()> {
        debug!(track_id = %self.current_index(), "Track ended, advancing");
        self.ensure_ready()?;

        if self.catalog.len() == 1 {
            self.output.set_position(Duration::ZERO)?;
            self.elapsed = Timestamp::ZERO;
            self.fill_percent = 0;
            return self.start_output();
        }
        self.next()
    }

    /// Called when the output reports a failure
    ///
    /// A failed output is no longer playing.
    pub fn on_output_error(&mut self, message: String) {
        warn!(error = %message, "Audio output error");
        self.emit_error(message);
        if self.is_playing {
            self.set_playing(false);
        }
    }

    fn play_index(&mut self, index: usize) -> Result<()> {
        if index == self.current {
            if self.is_playing {
                trace!("Already playing the requested track");
                return Ok(());
            }
            return self.start_output();
        }

        self.switch_to(index)?;
        self.start_output()
    }

    fn switch_to(&mut self, index: usize) -> Result<()> {
        let track = &self.catalog.tracks()[index];
        self.output.load(track)?;

        let previous = self.current;
        self.current = index;
        self.elapsed = Timestamp::ZERO;
        self.total = Timestamp::ZERO;
        self.fill_percent = 0;

        debug!(from = previous, to = index, title = %track.title, "Track changed");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: TrackId::new(index),
            previous_track_id: TrackId::new(previous),
        });
        Ok(())
    }

    fn start_output(&mut self) -> Result<()> {
        if let Err(e) = self.output.play() {
            // A freshly loaded source is not playing anymore
            self.set_playing(false);
            return Err(e);
        }

        self.set_playing(true);
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }

        self.is_playing = playing;
        self.pending_events.push(PlaybackEvent::StateChanged {
            status: self.status(),
        });
    }

    // ===== Seek =====

    /// Seek to `ratio` of the track's duration
    ///
    /// Ratios outside `[0, 1]` are forwarded unless the config asks for
    /// clamping. A negative target becomes the start of the track.
    pub fn seek_to(&mut self, ratio: f64) -> Result<()> {
        self.ensure_ready()?;
        if !ratio.is_finite() {
            return Err(PlaybackError::InvalidSeekTarget(format!(
                "ratio {ratio} is not finite"
            )));
        }

        let duration = self
            .output
            .duration()
            .ok_or(PlaybackError::DurationUnknown)?;

        let ratio = match self.seek_policy {
            SeekPolicy::Passthrough => ratio,
            SeekPolicy::Clamp => ratio.clamp(0.0, 1.0),
        };

        let target_secs = (ratio * duration.as_secs_f64()).max(0.0);
        let position = Duration::try_from_secs_f64(target_secs)
            .map_err(|e| PlaybackError::InvalidSeekTarget(e.to_string()))?;

        self.output.set_position(position)?;
        debug!(ratio, position_ms = position.as_millis() as u64, "Seeked");
        self.pending_events.push(PlaybackEvent::Seeked {
            position_ms: position.as_millis() as u64,
        });
        Ok(())
    }

    /// Seek from a click `offset_px` along a seek bar `width_px` wide
    pub fn seek_to_click(&mut self, offset_px: f64, width_px: f64) -> Result<()> {
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(PlaybackError::InvalidSeekTarget(format!(
                "seek bar width {width_px} must be positive"
            )));
        }

        self.seek_to(offset_px / width_px)
    }

    // ===== Progress =====

    /// Recompute elapsed/total and the seek-bar fill from a progress tick
    ///
    /// Ticks without a usable duration (metadata not loaded yet) are skipped
    /// and leave state untouched. Returns whether the tick was applied.
    pub fn on_progress_tick(&mut self, current_secs: f64, duration_secs: Option<f64>) -> bool {
        let duration = match duration_secs {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => {
                trace!(current_secs, "Skipping progress tick, duration unknown");
                return false;
            }
        };

        // elapsed never exceeds total
        let current = if current_secs.is_finite() {
            current_secs.clamp(0.0, duration)
        } else {
            0.0
        };

        self.elapsed = Timestamp::from_secs_f64(current);
        self.total = Timestamp::from_secs_f64(duration);
        self.fill_percent = (current / duration * 100.0).floor() as u8;

        self.pending_events.push(PlaybackEvent::Progress {
            elapsed: self.elapsed,
            total: self.total,
            fill_percent: self.fill_percent,
        });
        true
    }

    // ===== State =====

    /// Current catalog index
    pub fn current_index(&self) -> TrackId {
        TrackId::new(self.current)
    }

    /// Current track metadata
    pub fn current_track(&self) -> &Track {
        &self.catalog.tracks()[self.current]
    }

    /// Whether the output is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback status as an enum
    pub fn status(&self) -> PlaybackStatus {
        if self.is_playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        }
    }

    /// Elapsed time from the last applied tick
    pub fn elapsed(&self) -> Timestamp {
        self.elapsed
    }

    /// Total time from the last applied tick
    pub fn total(&self) -> Timestamp {
        self.total
    }

    /// Seek-bar fill percentage from the last applied tick
    pub fn fill_percent(&self) -> u8 {
        self.fill_percent
    }

    /// Copy of the playback state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.current_track().clone(),
            is_playing: self.is_playing,
            elapsed: self.elapsed,
            total: self.total,
        }
    }

    /// State plus derived display values
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            fill_percent: self.fill_percent,
            output_ready: self.output_ready,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}
