//! Playback session - one task owning the controller
//!
//! Commands from every [`PlaybackHandle`] and events from the audio output
//! are serialized through a single loop, so a progress tick never interleaves
//! with a command.

use crate::{
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::{AudioOutput, OutputEvent, OutputLink},
    types::{PlaybackConfig, PlaybackSnapshot},
};
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::Arc;
use sterophile_core::{Catalog, CatalogProvider, TrackId};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

type Reply = oneshot::Sender<Result<()>>;

enum SeekTarget {
    Ratio(f64),
    Click { offset_px: f64, width_px: f64 },
}

enum Command {
    SelectAndPlay(TrackId, Reply),
    Play(Reply),
    Pause(Reply),
    Next(Reply),
    Previous(Reply),
    Seek(SeekTarget, Reply),
    Shutdown(oneshot::Sender<()>),
}

impl Command {
    fn is_seek(&self) -> bool {
        matches!(self, Self::Seek(..))
    }

    fn reject(self, error: impl Fn() -> PlaybackError) {
        match self {
            Self::SelectAndPlay(_, reply)
            | Self::Play(reply)
            | Self::Pause(reply)
            | Self::Next(reply)
            | Self::Previous(reply)
            | Self::Seek(_, reply) => {
                let _ = reply.send(Err(error()));
            }
            Self::Shutdown(done) => {
                let _ = done.send(());
            }
        }
    }
}

/// The task that owns a [`PlaybackController`]
///
/// Created with [`PlaybackSession::spawn`] or [`PlaybackSession::start`];
/// callers only ever see the returned [`PlaybackHandle`].
pub struct PlaybackSession<O: AudioOutput> {
    controller: PlaybackController<O>,
    commands: mpsc::Receiver<Command>,

    ready: Option<oneshot::Receiver<()>>,
    readiness_lost: bool,
    output_events: mpsc::Receiver<OutputEvent>,
    output_closed: bool,
    shutdown_ack: Option<oneshot::Sender<()>>,

    // Commands received before readiness
    pending: VecDeque<Command>,
    // Commands to run before reading the channel again
    backlog: VecDeque<Command>,

    events: broadcast::Sender<PlaybackEvent>,
    state: watch::Sender<PlaybackSnapshot>,
}

impl<O: AudioOutput + 'static> PlaybackSession<O> {
    /// Spawn a session over an already loaded catalog
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        catalog: Arc<Catalog>,
        output: O,
        link: OutputLink,
        config: PlaybackConfig,
    ) -> Result<PlaybackHandle> {
        let (commands_tx, commands_rx) = mpsc::channel(config.command_capacity.max(1));
        let (events_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let controller = PlaybackController::new(Arc::clone(&catalog), output, config)?;
        let (state_tx, state_rx) = watch::channel(controller.snapshot());

        let session = Self {
            controller,
            commands: commands_rx,
            ready: Some(link.ready),
            readiness_lost: false,
            output_events: link.events,
            output_closed: false,
            shutdown_ack: None,
            pending: VecDeque::new(),
            backlog: VecDeque::new(),
            events: events_tx.clone(),
            state: state_tx,
        };

        info!(tracks = catalog.len(), "Starting playback session");
        tokio::spawn(session.run());

        Ok(PlaybackHandle {
            commands: commands_tx,
            events: events_tx,
            state: state_rx,
            catalog,
        })
    }

    /// Load the catalog once from `provider`, then spawn a session
    pub async fn start(
        provider: &dyn CatalogProvider,
        output: O,
        link: OutputLink,
        config: PlaybackConfig,
    ) -> Result<PlaybackHandle> {
        let catalog = provider.load_catalog().await?;
        Self::spawn(Arc::new(catalog), output, link, config)
    }

    async fn run(mut self) {
        loop {
            if let Some(command) = self.backlog.pop_front() {
                if self.dispatch(command).is_break() {
                    break;
                }
                continue;
            }

            tokio::select! {
                biased;

                signal = wait_ready(&mut self.ready) => {
                    self.ready = None;
                    match signal {
                        Ok(()) => self.on_ready(),
                        Err(_) => self.on_readiness_lost(),
                    }
                }

                event = self.output_events.recv(),
                    if self.controller.is_output_ready() && !self.output_closed =>
                {
                    match event {
                        Some(event) => self.on_output_event(event),
                        None => {
                            debug!("Output event stream closed");
                            self.output_closed = true;
                        }
                    }
                }

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("All playback handles dropped");
                        break;
                    };
                    if self.dispatch(command).is_break() {
                        break;
                    }
                }
            }
        }

        self.commands.close();
        while let Ok(command) = self.commands.try_recv() {
            self.backlog.push_back(command);
        }
        for command in self.pending.drain(..).chain(self.backlog.drain(..)) {
            command.reject(|| PlaybackError::SessionClosed);
        }

        info!("Playback session stopped");
        if let Some(ack) = self.shutdown_ack.take() {
            let _ = ack.send(());
        }
    }

    fn dispatch(&mut self, command: Command) -> ControlFlow<()> {
        if let Command::Shutdown(done) = command {
            debug!("Shutdown requested");
            self.shutdown_ack = Some(done);
            return ControlFlow::Break(());
        }

        if !self.controller.is_output_ready() {
            if self.readiness_lost {
                command.reject(|| PlaybackError::OutputUnavailable);
            } else {
                self.enqueue(command);
            }
            return ControlFlow::Continue(());
        }

        let command = if command.is_seek() {
            self.coalesce_seeks(command)
        } else {
            command
        };
        self.apply(command);
        ControlFlow::Continue(())
    }

    fn enqueue(&mut self, command: Command) {
        if command.is_seek() && self.pending.back().is_some_and(Command::is_seek) {
            if let Some(Command::Seek(_, superseded)) = self.pending.pop_back() {
                let _ = superseded.send(Ok(()));
            }
        }

        debug!(queued = self.pending.len() + 1, "Output not ready, queueing command");
        self.pending.push_back(command);
    }

    /// Replace `seek` with any seeks queued right behind it
    fn coalesce_seeks(&mut self, mut seek: Command) -> Command {
        loop {
            let next = self
                .backlog
                .pop_front()
                .or_else(|| self.commands.try_recv().ok());

            match next {
                Some(newer) if newer.is_seek() => {
                    if let Command::Seek(_, superseded) = std::mem::replace(&mut seek, newer) {
                        let _ = superseded.send(Ok(()));
                    }
                }
                Some(other) => {
                    self.backlog.push_front(other);
                    return seek;
                }
                None => return seek,
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let controller = &mut self.controller;
        let (result, reply) = match command {
            Command::SelectAndPlay(id, reply) => (controller.select_and_play(id), reply),
            Command::Play(reply) => (controller.play(), reply),
            Command::Pause(reply) => (controller.pause(), reply),
            Command::Next(reply) => (controller.next(), reply),
            Command::Previous(reply) => (controller.previous(), reply),
            Command::Seek(SeekTarget::Ratio(ratio), reply) => (controller.seek_to(ratio), reply),
            Command::Seek(
                SeekTarget::Click {
                    offset_px,
                    width_px,
                },
                reply,
            ) => (controller.seek_to_click(offset_px, width_px), reply),
            Command::Shutdown(done) => {
                self.shutdown_ack = Some(done);
                return;
            }
        };

        if let Err(e) = &result {
            debug!(error = %e, "Playback command failed");
        }
        self.publish();
        let _ = reply.send(result);
    }

    fn on_ready(&mut self) {
        if let Err(e) = self.controller.on_output_ready() {
            warn!(error = %e, "Failed to load first track");
            self.publish();
            self.on_readiness_lost();
            return;
        }
        self.publish();

        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "Replaying queued commands");
        }
        self.backlog.extend(self.pending.drain(..));
    }

    fn on_readiness_lost(&mut self) {
        warn!("Audio output unavailable, failing queued commands");
        self.readiness_lost = true;
        for command in self.pending.drain(..) {
            command.reject(|| PlaybackError::OutputUnavailable);
        }
    }

    fn on_output_event(&mut self, event: OutputEvent) {
        match event {
            OutputEvent::TimeUpdate { position, duration } => {
                let applied = self
                    .controller
                    .on_progress_tick(position.as_secs_f64(), duration.map(|d| d.as_secs_f64()));
                if !applied {
                    return;
                }
            }
            OutputEvent::Ended => {
                if let Err(e) = self.controller.on_track_ended() {
                    self.controller.on_output_error(e.to_string());
                }
            }
            OutputEvent::Error(message) => self.controller.on_output_error(message),
        }
        self.publish();
    }

    fn publish(&mut self) {
        for event in self.controller.drain_events() {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
        self.state.send_replace(self.controller.snapshot());
    }
}

async fn wait_ready(
    ready: &mut Option<oneshot::Receiver<()>>,
) -> std::result::Result<(), oneshot::error::RecvError> {
    match ready {
        Some(rx) => rx.await,
        None => std::future::pending().await,
    }
}

/// Cloneable handle to a running [`PlaybackSession`]
///
/// Every command resolves once the session has applied it. Commands sent
/// before the audio output is ready wait in the session's queue.
#[derive(Clone)]
pub struct PlaybackHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<PlaybackEvent>,
    state: watch::Receiver<PlaybackSnapshot>,
    catalog: Arc<Catalog>,
}

impl PlaybackHandle {
    async fn request(&self, command: impl FnOnce(Reply) -> Command) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(command(tx))
            .await
            .map_err(|_| PlaybackError::SessionClosed)?;
        rx.await.map_err(|_| PlaybackError::SessionClosed)?
    }

    /// Make `id` current and play it
    pub async fn select_and_play(&self, id: TrackId) -> Result<()> {
        self.request(|reply| Command::SelectAndPlay(id, reply)).await
    }

    /// Resume the current track
    pub async fn play(&self) -> Result<()> {
        self.request(Command::Play).await
    }

    /// Pause the current track
    pub async fn pause(&self) -> Result<()> {
        self.request(Command::Pause).await
    }

    /// Advance, wrapping past the last track
    pub async fn next(&self) -> Result<()> {
        self.request(Command::Next).await
    }

    /// Step back; stays put on the first track
    pub async fn previous(&self) -> Result<()> {
        self.request(Command::Previous).await
    }

    /// Seek to `ratio` of the current track
    ///
    /// A seek superseded by a newer one resolves `Ok` without being applied.
    pub async fn seek_to(&self, ratio: f64) -> Result<()> {
        self.request(|reply| Command::Seek(SeekTarget::Ratio(ratio), reply))
            .await
    }

    /// Seek from a click on a seek bar of the given width
    pub async fn seek_to_click(&self, offset_px: f64, width_px: f64) -> Result<()> {
        self.request(|reply| {
            Command::Seek(
                SeekTarget::Click {
                    offset_px,
                    width_px,
                },
                reply,
            )
        })
        .await
    }

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.state.borrow().clone()
    }

    /// Watch published state
    pub fn subscribe_state(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.state.clone()
    }

    /// Receive playback events emitted from now on
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Catalog the session navigates
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Whether the session task is still running
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Stop the session
    ///
    /// Resolves once the loop has stopped. Commands issued afterwards fail
    /// with `SessionClosed`.
    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        if self.commands.send(Command::Shutdown(tx)).await.is_ok() {
            let _ = rx.await;
        }
    }
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("tracks", &self.catalog.len())
            .field("closed", &self.commands.is_closed())
            .finish()
    }
}
