//! WebSocket message DTOs.
//!
//! Every frame is one JSON document with a `type` field. Relayed `data`
//! messages are forwarded verbatim, so only the fixed notices sent by the
//! server itself have a dedicated shape here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Connected,
    Success,
    Error,
    Data,
    InitializationData,
}

/// Notice sent by the server (`connected`, `success`, `error`, snapshot `data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub r#type: MessageType,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lobby: Option<String>,
}

/// Payload of a `success` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinAckData {
    pub is_leader: bool,
    /// Omitted on leader-promotion notices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<u64>,
}

/// Message sent by a client: join request, relayed `data`, or `initialization_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub r#type: MessageType,
    pub lobby: String,
    pub game: String,
    pub data: Value,
}
