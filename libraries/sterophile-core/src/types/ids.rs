/// ID types for Sterophile entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// A track's id is its stable index into the catalog, so it doubles as the
/// position used for next/previous navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(usize);

impl TrackId {
    /// Create a new track ID
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the catalog index this id refers to
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for TrackId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_integer() {
        let id = TrackId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let back: TrackId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(serde_json::from_str::<TrackId>("-1").is_err());
    }
}
