//! Common test utilities and fixtures
#![allow(dead_code)]

use std::io::Write;
use sterophile_core::{Catalog, Track};
use sterophile_server::{router, AppState};
use tempfile::NamedTempFile;

/// Three-song catalog
pub fn test_catalog() -> Catalog {
    Catalog::new(vec![
        Track::new(
            0,
            "Morning Static",
            "The Lowlights",
            "https://cdn.test/0.jpg",
            "https://cdn.test/0.mp3",
        )
        .with_duration_hint("3:00"),
        Track::new(
            1,
            "Glass Harbor",
            "Mira Sol",
            "https://cdn.test/1.jpg",
            "https://cdn.test/1.mp3",
        ),
        Track::new(
            2,
            "Night Ferry",
            "Ocean Avenue",
            "https://cdn.test/2.jpg",
            "https://cdn.test/2.mp3",
        ),
    ])
    .unwrap()
}

/// Router serving [`test_catalog`]
pub fn test_app() -> axum::Router {
    router(AppState::from_catalog(test_catalog()))
}

/// Write `contents` to a temporary file that lives as long as the handle
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
