//! Sterophile Catalog Client
//!
//! HTTP client library for the Sterophile catalog service.
//!
//! # Features
//!
//! - **Health check**: verify the service is up and report its version
//! - **Catalog fetch**: list every song, or look one up by id
//! - **Playback integration**: [`CatalogClient`] implements
//!   [`sterophile_core::CatalogProvider`], so a playback session can load its
//!   catalog straight from the service
//!
//! # Example
//!
//! ```ignore
//! use sterophile_client::{CatalogClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("http://localhost:4000"))?;
//!
//!     let health = client.health().await?;
//!     println!("Catalog service v{} is {}", health.version, health.status);
//!
//!     let catalog = client.fetch_catalog().await?;
//!     println!("Found {} songs", catalog.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, HealthResponse, SongsResponse};
