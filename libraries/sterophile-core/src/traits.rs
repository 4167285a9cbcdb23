/// Core traits for Sterophile
use crate::error::Result;
use crate::types::{Catalog, Track, TrackId};
use async_trait::async_trait;

/// Source of catalog metadata
///
/// Implemented by the in-memory `Catalog` (used by the server) and by the
/// HTTP catalog client. Playback sessions read it once at startup.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List every track in catalog order
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Look up one track by id
    ///
    /// Returns `Ok(None)` when the id is not in the catalog.
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Fetch the full catalog and validate it
    async fn load_catalog(&self) -> Result<Catalog> {
        Catalog::new(self.list_tracks().await?)
    }
}

#[async_trait]
impl CatalogProvider for Catalog {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.tracks().to_vec())
    }

    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.get(id).cloned())
    }

    async fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_catalog_serves_tracks() {
        let catalog = Catalog::new(vec![
            Track::new(0, "A", "X", "a.jpg", "a.mp3"),
            Track::new(1, "B", "Y", "b.jpg", "b.mp3"),
        ])
        .unwrap();

        let provider: &dyn CatalogProvider = &catalog;
        assert_eq!(provider.list_tracks().await.unwrap().len(), 2);
        assert_eq!(
            provider.get_track(TrackId::new(1)).await.unwrap().unwrap().title,
            "B"
        );
        assert!(provider.get_track(TrackId::new(9)).await.unwrap().is_none());
        assert_eq!(provider.load_catalog().await.unwrap(), catalog);
    }
}
