//! Catalog service client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, HealthResponse, SongsResponse};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use sterophile_core::{Catalog, CatalogProvider, CoreError, Track, TrackId};
use tracing::{debug, info};
use url::Url;

/// Client for the Sterophile catalog service.
///
/// The catalog is read-only, so the client holds no mutable state and can be
/// shared freely.
///
/// # Example
///
/// ```ignore
/// use sterophile_client::{CatalogClient, ClientConfig};
///
/// let client = CatalogClient::new(ClientConfig::new("http://localhost:4000"))?;
/// let songs = client.list_tracks().await?;
/// println!("Found {} songs", songs.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if parsed.host_str().is_none() {
            return Err(ClientError::InvalidUrl("URL must include a host".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Sterophile/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Check that the service is up.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.get("/api/health").await?;
        let health: HealthResponse = parse(response, "health").await?;

        info!(
            status = %health.status,
            version = %health.version,
            songs = health.songs,
            "Connected to catalog service"
        );
        Ok(health)
    }

    /// Fetch every song, in catalog order.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        let response = self.get("/api/songs").await?;
        let body: SongsResponse = parse(response, "songs").await?;

        if body.total != body.songs.len() {
            debug!(
                total = body.total,
                received = body.songs.len(),
                "Song count does not match total"
            );
        }
        debug!(songs = body.songs.len(), "Fetched songs");
        Ok(body.songs)
    }

    /// Fetch one song by id.
    ///
    /// Fails with [`ClientError::NotFound`] when the service has no such song.
    pub async fn get_track(&self, id: TrackId) -> Result<Track> {
        let response = self.get(&format!("/api/songs/{id}")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id.to_string()));
        }

        parse(response, "song").await
    }

    /// Fetch and validate the whole catalog.
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::new(self.list_tracks().await?)?;
        info!(songs = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })
    }
}

async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {what} response: {e}")))
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message: error_message(&error_text),
        })
    }
}

/// Pull `error` out of a `{ "error": ... }` body, falling back to the raw text
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.to_string(), |b| b.error)
}

#[async_trait]
impl CatalogProvider for CatalogClient {
    async fn list_tracks(&self) -> sterophile_core::Result<Vec<Track>> {
        Ok(CatalogClient::list_tracks(self).await?)
    }

    async fn get_track(&self, id: TrackId) -> sterophile_core::Result<Option<Track>> {
        match CatalogClient::get_track(self, id).await {
            Ok(track) => Ok(Some(track)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    async fn load_catalog(&self) -> sterophile_core::Result<Catalog> {
        Ok(self.fetch_catalog().await?)
    }
}
