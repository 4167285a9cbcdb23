//! Platform-agnostic audio output seam
//!
//! The controller commands an [`AudioOutput`] and never inspects its
//! internals. Outputs report back asynchronously through an [`OutputLink`].

use crate::error::Result;
use std::time::Duration;
use sterophile_core::Track;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

/// Audio output handle
///
/// Implementors wrap whatever actually produces sound (a browser media
/// element bridge, a desktop audio stream, a remote renderer). The
/// controller is the only writer.
#[cfg_attr(test, mockall::automock)]
pub trait AudioOutput: Send {
    /// Point the output at a track's audio asset
    ///
    /// Loading does not start playback.
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Stop output, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position in the loaded track
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Duration of the loaded track, once its metadata is known
    fn duration(&self) -> Option<Duration>;
}

/// Asynchronous reports from the audio output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Periodic progress report
    TimeUpdate {
        /// Current playback position
        position: Duration,
        /// Track duration (`None` until metadata has loaded)
        duration: Option<Duration>,
    },

    /// The loaded track played to its end
    Ended,

    /// The output failed and stopped
    Error(String),
}

/// Receiving half handed to the playback session
#[derive(Debug)]
pub struct OutputLink {
    pub(crate) ready: oneshot::Receiver<()>,
    pub(crate) events: mpsc::Receiver<OutputEvent>,
}

/// Sending half kept by the audio output implementation
#[derive(Debug)]
pub struct OutputNotifier {
    ready: Option<oneshot::Sender<()>>,
    events: mpsc::Sender<OutputEvent>,
}

/// Create a connected notifier/link pair
///
/// `capacity` bounds the number of undelivered output events.
pub fn output_link(capacity: usize) -> (OutputNotifier, OutputLink) {
    let (ready_tx, ready_rx) = oneshot::channel();
    let (events_tx, events_rx) = mpsc::channel(capacity.max(1));

    (
        OutputNotifier {
            ready: Some(ready_tx),
            events: events_tx,
        },
        OutputLink {
            ready: ready_rx,
            events: events_rx,
        },
    )
}

impl OutputNotifier {
    /// Signal that the output can accept commands
    ///
    /// Only the first call has an effect. Returns `false` when readiness was
    /// already signalled or the session is gone.
    pub fn mark_ready(&mut self) -> bool {
        match self.ready.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Whether readiness has been signalled
    pub fn is_ready(&self) -> bool {
        self.ready.is_none()
    }

    /// Deliver an event, waiting for channel space
    ///
    /// Returns `false` when the session is gone or readiness has not been
    /// signalled yet. Events from before readiness are discarded.
    pub async fn send(&self, event: OutputEvent) -> bool {
        if !self.is_ready() {
            trace!(?event, "Dropped output event before readiness");
            return false;
        }
        self.events.send(event).await.is_ok()
    }

    /// Deliver an event without waiting
    ///
    /// For realtime callbacks: when the channel is full the event is dropped.
    /// Returns whether it was queued.
    pub fn try_send(&self, event: OutputEvent) -> bool {
        if !self.is_ready() {
            trace!(?event, "Dropped output event before readiness");
            return false;
        }
        match self.events.try_send(event) {
            Ok(()) => true,
            Err(e) => {
                trace!(error = %e, "Dropped output event");
                false
            }
        }
    }

    /// Report a progress tick
    pub fn time_update(&self, position: Duration, duration: Option<Duration>) -> bool {
        self.try_send(OutputEvent::TimeUpdate { position, duration })
    }

    /// Report that the loaded track finished
    pub async fn ended(&self) -> bool {
        self.send(OutputEvent::Ended).await
    }
}
