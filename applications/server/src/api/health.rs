/// Service status route
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of songs the catalog currently serves
    pub songs: usize,
}

/// GET /api/health
///
/// Fails with the catalog's error when the catalog cannot be read, so an
/// unusable catalog does not report as healthy.
pub async fn health(State(app_state): State<AppState>) -> Result<Json<HealthResponse>> {
    let songs = app_state.catalog.list_tracks().await?.len();

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        songs,
    }))
}
