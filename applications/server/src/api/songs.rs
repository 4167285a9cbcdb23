/// Song catalog API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sterophile_core::{Track, TrackId};

#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub songs: Vec<Track>,
    pub total: usize,
}

/// GET /api/songs
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<SongsResponse>> {
    let songs = app_state.catalog.list_tracks().await?;
    let total = songs.len();

    Ok(Json(SongsResponse { songs, total }))
}

/// GET /api/songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Track>> {
    // Anything that is not a catalog index cannot name a song
    let track_id = id
        .parse::<usize>()
        .map(TrackId::new)
        .map_err(|_| ServerError::NotFound("Song not found".to_string()))?;

    let track = app_state
        .catalog
        .get_track(track_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;
    Ok(Json(track))
}
