//! HTTP status endpoint response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatusDto {
    pub players: usize,
    pub lobbies: usize,
    pub next_player_id: u64,
}

/// `GET /lobbies`: lobby name → member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyListDto {
    pub lobbies: BTreeMap<String, usize>,
}

/// `GET /lobbies/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyDetailDto {
    pub name: String,
    pub game: String,
    pub leader: Option<u64>,
    pub members: Vec<u64>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}
