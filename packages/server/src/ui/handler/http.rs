//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{LobbyDetailDto, LobbyListDto, ServerStatusDto},
    ui::state::AppState,
    usecase::GetLobbyDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Live player count, lobby count and the next player id
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ServerStatusDto> {
    let status = state.get_server_status_usecase.execute().await;
    Json(status.into())
}

/// Lobby names with their member counts
pub async fn get_lobbies(State(state): State<Arc<AppState>>) -> Json<LobbyListDto> {
    let lobbies = state.get_lobbies_usecase.execute().await;
    Json(LobbyListDto::from(lobbies.as_slice()))
}

/// Get lobby detail by name
pub async fn get_lobby_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<LobbyDetailDto>, StatusCode> {
    match state.get_lobby_detail_usecase.execute(name).await {
        Ok(lobby) => Ok(Json(lobby.into())),
        Err(GetLobbyDetailError::LobbyNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetLobbyDetailError::InvalidName) => Err(StatusCode::BAD_REQUEST),
    }
}
