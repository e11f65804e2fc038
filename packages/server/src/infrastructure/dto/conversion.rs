//! Conversion logic between DTOs and domain types.

use serde_json::{Map, Value};

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{Lobby, OutboundMessage, ServerStatus};
use crate::infrastructure::dto::{
    http::{LobbyDetailDto, LobbyListDto, ServerStatusDto},
    websocket::{JoinAckData, MessageType, ServerMessage},
};

// ========================================
// Domain → WebSocket frame
// ========================================

/// Encode an outbound message as the text of one WebSocket frame.
///
/// Relayed messages are written back exactly as the document that was received
/// (after any game transform).
pub fn encode_outbound(message: &OutboundMessage) -> Result<String, serde_json::Error> {
    let notice = match message {
        OutboundMessage::Relay { document } => return serde_json::to_string(document),
        OutboundMessage::Connected => ServerMessage {
            r#type: MessageType::Connected,
            data: empty_object(),
            lobby: None,
        },
        OutboundMessage::JoinAccepted {
            lobby,
            player_id,
            is_leader,
        } => ServerMessage {
            r#type: MessageType::Success,
            data: serde_json::to_value(JoinAckData {
                is_leader: *is_leader,
                player_id: Some(player_id.value()),
            })?,
            lobby: Some(lobby.to_string()),
        },
        OutboundMessage::Rejected => ServerMessage {
            r#type: MessageType::Error,
            data: empty_object(),
            lobby: None,
        },
        OutboundMessage::Snapshot { data } => ServerMessage {
            r#type: MessageType::Data,
            data: data.clone(),
            lobby: None,
        },
        OutboundMessage::Promoted { lobby } => ServerMessage {
            r#type: MessageType::Success,
            data: serde_json::to_value(JoinAckData {
                is_leader: true,
                player_id: None,
            })?,
            lobby: Some(lobby.to_string()),
        },
    };

    serde_json::to_string(&notice)
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<ServerStatus> for ServerStatusDto {
    fn from(status: ServerStatus) -> Self {
        Self {
            players: status.players,
            lobbies: status.lobbies,
            next_player_id: status.next_player_id.value(),
        }
    }
}

impl From<&[Lobby]> for LobbyListDto {
    fn from(lobbies: &[Lobby]) -> Self {
        Self {
            lobbies: lobbies
                .iter()
                .map(|lobby| (lobby.name.to_string(), lobby.member_count()))
                .collect(),
        }
    }
}

impl From<Lobby> for LobbyDetailDto {
    fn from(lobby: Lobby) -> Self {
        Self {
            leader: lobby.leader().map(|id| id.value()),
            members: lobby.members().iter().map(|id| id.value()).collect(),
            created_at: timestamp_to_rfc3339(lobby.created_at.value()),
            name: lobby.name.into_string(),
            game: lobby.game_tag.to_string(),
        }
    }
}
