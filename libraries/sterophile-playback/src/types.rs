//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::fmt;
use sterophile_core::Track;

/// Minutes/seconds pair shown as elapsed or total time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole minutes
    pub minutes: u32,

    /// Remaining whole seconds (0-59)
    pub seconds: u32,
}

impl Timestamp {
    /// 0:00
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    /// Create a timestamp from its parts
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Split fractional seconds into `{floor(s / 60), floor(s % 60)}`
    ///
    /// Negative and non-finite input maps to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::ZERO;
        }

        Self {
            minutes: (secs / 60.0).floor() as u32,
            seconds: (secs % 60.0).floor() as u32,
        }
    }

    /// Total whole seconds
    pub const fn as_secs(self) -> u64 {
        self.minutes as u64 * 60 + self.seconds as u64
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// Playback status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Output is stopped on the current track
    #[default]
    Paused,

    /// Output is playing the current track
    Playing,
}

/// What is playing and how far along it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track currently selected in the catalog
    pub current_track: Track,

    /// Mirrors the output handle's play/pause state
    pub is_playing: bool,

    /// Position reported by the last progress tick
    pub elapsed: Timestamp,

    /// Duration reported by the last progress tick
    pub total: Timestamp,
}

impl PlaybackState {
    /// Status as an enum
    pub fn status(&self) -> PlaybackStatus {
        if self.is_playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        }
    }
}

/// State published to UI consumers after every command or tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Playback state
    pub state: PlaybackState,

    /// Seek-bar fill, 0-100
    pub fill_percent: u8,

    /// Whether the audio output has signalled readiness
    pub output_ready: bool,
}

/// How seek ratios outside `[0, 1]` are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekPolicy {
    /// Forward the ratio unchanged (clicks outside the bar seek outside the track)
    #[default]
    Passthrough,

    /// Clamp the ratio into `[0, 1]`
    Clamp,
}

/// Configuration for playback sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seek ratio handling (default: Passthrough)
    pub seek_policy: SeekPolicy,

    /// Command channel capacity (default: 32)
    pub command_capacity: usize,

    /// Event broadcast capacity (default: 64)
    pub event_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_policy: SeekPolicy::Passthrough,
            command_capacity: 32,
            event_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.seek_policy, SeekPolicy::Passthrough);
        assert_eq!(config.command_capacity, 32);
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"seek_policy":"clamp"}"#).unwrap();
        assert_eq!(config.seek_policy, SeekPolicy::Clamp);
        assert_eq!(config.command_capacity, 32);
    }

    #[test]
    fn timestamp_splits_seconds() {
        assert_eq!(Timestamp::from_secs_f64(75.0), Timestamp::new(1, 15));
        assert_eq!(Timestamp::from_secs_f64(150.0), Timestamp::new(2, 30));
        assert_eq!(Timestamp::from_secs_f64(59.999), Timestamp::new(0, 59));
        assert_eq!(Timestamp::from_secs_f64(3600.5), Timestamp::new(60, 0));
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert_eq!(Timestamp::from_secs_f64(f64::NAN), Timestamp::ZERO);
        assert_eq!(Timestamp::from_secs_f64(f64::INFINITY), Timestamp::ZERO);
        assert_eq!(Timestamp::from_secs_f64(-4.0), Timestamp::ZERO);
    }

    #[test]
    fn timestamp_display_pads_seconds() {
        assert_eq!(Timestamp::new(3, 5).to_string(), "3:05");
        assert_eq!(Timestamp::new(12, 40).to_string(), "12:40");
        assert_eq!(Timestamp::ZERO.to_string(), "0:00");
        assert_eq!(Timestamp::new(2, 30).as_secs(), 150);
    }
}
