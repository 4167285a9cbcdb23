//! Sterophile Core
//!
//! Platform-agnostic catalog types, traits, and error handling for Sterophile.
//!
//! This crate provides the building blocks shared by the catalog server,
//! the catalog client, and the playback controller.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Catalog`
//! - **Core Traits**: `CatalogProvider`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use sterophile_core::{Catalog, Track, TrackId};
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(0, "Song One", "Artist", "https://cdn/one.jpg", "https://cdn/one.mp3"),
//!     Track::new(1, "Song Two", "Artist", "https://cdn/two.jpg", "https://cdn/two.mp3"),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get(TrackId::new(1)).unwrap().title, "Song Two");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::CatalogProvider;
pub use types::{Catalog, Track, TrackId};
