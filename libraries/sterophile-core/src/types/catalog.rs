//! Ordered, read-only track catalog

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered sequence of tracks indexed `0..N`
///
/// Every track's id equals its position, which is checked on construction.
/// Navigation (next/previous) is defined purely on these indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, validating that ids match positions
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if let Some((position, track)) = tracks
            .iter()
            .enumerate()
            .find(|(position, track)| track.id.index() != *position)
        {
            return Err(CoreError::IdMismatch {
                id: track.id,
                position,
            });
        }

        Ok(Self { tracks })
    }

    /// Parse a JSON array of tracks
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    /// Read and parse a JSON catalog file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id.index())
    }

    /// Look up a track by id, failing with `TrackNotFound`
    pub fn require(&self, id: TrackId) -> Result<&Track> {
        self.get(id).ok_or(CoreError::TrackNotFound(id))
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate over tracks in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl TryFrom<Vec<Track>> for Catalog {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<Catalog> for Vec<Track> {
    fn from(catalog: Catalog) -> Self {
        catalog.tracks
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
