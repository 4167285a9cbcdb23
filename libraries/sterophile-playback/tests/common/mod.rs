//! Shared fixtures for playback tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use sterophile_core::{Catalog, Track, TrackId};
use sterophile_playback::{AudioOutput, PlaybackError, Result};

/// A call received by [`FakeOutput`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(TrackId),
    Play,
    Pause,
    SetPosition(Duration),
}

/// Audio output that records every call
///
/// Clones share the same call log and settings, so a test can keep one
/// clone while the controller owns the other.
#[derive(Debug, Clone, Default)]
pub struct FakeOutput {
    calls: Arc<Mutex<Vec<Call>>>,
    duration: Arc<Mutex<Option<Duration>>>,
    fail_load: Arc<Mutex<Option<TrackId>>>,
}

impl FakeOutput {
    pub fn with_duration(secs: u64) -> Self {
        let output = Self::default();
        output.set_duration(Some(Duration::from_secs(secs)));
        output
    }

    pub fn set_duration(&self, duration: Option<Duration>) {
        *self.duration.lock().unwrap() = duration;
    }

    pub fn fail_loading(&self, id: TrackId) {
        *self.fail_load.lock().unwrap() = Some(id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn positions(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::SetPosition(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, track: &Track) -> Result<()> {
        if *self.fail_load.lock().unwrap() == Some(track.id) {
            return Err(PlaybackError::output(format!("cannot load {}", track.audio_url)));
        }
        self.record(Call::Load(track.id));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.record(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record(Call::Pause);
        Ok(())
    }

    fn set_position(&mut self, position: Duration) -> Result<()> {
        self.record(Call::SetPosition(position));
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        *self.duration.lock().unwrap()
    }
}

/// Catalog with `n` tracks named "Track 0", "Track 1", ...
pub fn catalog(n: usize) -> Arc<Catalog> {
    let tracks = (0..n)
        .map(|i| {
            Track::new(
                i,
                format!("Track {i}"),
                "Test Artist",
                format!("https://cdn.test/covers/{i}.jpg"),
                format!("https://cdn.test/audio/{i}.mp3"),
            )
        })
        .collect();
    Arc::new(Catalog::new(tracks).unwrap())
}

/// The three-song catalog used in scenario tests
pub fn abc_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Track::new(0, "A", "Artist A", "a.jpg", "a.mp3"),
            Track::new(1, "B", "Artist B", "b.jpg", "b.mp3"),
            Track::new(2, "C", "Artist C", "c.jpg", "c.mp3"),
        ])
        .unwrap(),
    )
}
