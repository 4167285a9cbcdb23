//! Types for catalog service requests and responses.

use serde::{Deserialize, Serialize};
use sterophile_core::Track;

/// Configuration for connecting to a catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:4000")
    pub url: String,
}

impl ClientConfig {
    /// Create a config for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Songs the service currently serves
    pub songs: usize,
}

/// Response from `GET /api/songs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongsResponse {
    pub songs: Vec<Track>,
    pub total: usize,
}
