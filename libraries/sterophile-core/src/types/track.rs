/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// One playable song: metadata plus URLs of its externally hosted assets
///
/// Tracks are immutable once fetched. On the wire the fields are camelCase;
/// the short asset-pack names (`name`, `image`, `file`, `desc`, `duration`)
/// are accepted as aliases when reading catalog files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable index into the catalog
    pub id: TrackId,

    /// Track title
    #[serde(alias = "name")]
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Cover art URL
    #[serde(alias = "image")]
    pub image_url: String,

    /// Audio file URL
    #[serde(alias = "file")]
    pub audio_url: String,

    /// Display duration as published by the catalog (e.g. "3:20")
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<String>,

    /// Short blurb shown under the title
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Track {
    /// Create a new track with the required metadata
    pub fn new(
        id: usize,
        title: impl Into<String>,
        artist: impl Into<String>,
        image_url: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            image_url: image_url.into(),
            audio_url: audio_url.into(),
            duration_hint: None,
            description: None,
        }
    }

    /// Attach the catalog's display duration
    #[must_use]
    pub fn with_duration_hint(mut self, hint: impl Into<String>) -> Self {
        self.duration_hint = Some(hint.into());
        self
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
