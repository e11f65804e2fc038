//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use hiroba_server::infrastructure::dto::websocket::{ClientMessage, MessageType};
use serde_json::{Map, Value, json};

use crate::error::ClientError;

/// Input prefix that sends the rest of the line as `initialization_data`
const INIT_COMMAND: &str = "/init";

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if reconnecting cannot help (the server refused us), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Rejected(_) | ClientError::JoinRejected(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// The first message of every session: a `data` message naming the lobby and game.
pub fn join_request(lobby: &str, game: &str) -> ClientMessage {
    ClientMessage {
        r#type: MessageType::Data,
        lobby: lobby.to_string(),
        game: game.to_string(),
        data: Value::Object(Map::new()),
    }
}

/// Turn one line of user input into an outbound message.
///
/// `/init <json>` becomes `initialization_data`; anything else is `data`.
pub fn message_from_input(line: &str, lobby: &str, game: &str) -> ClientMessage {
    let (r#type, text) = match line.strip_prefix(INIT_COMMAND) {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => {
            (MessageType::InitializationData, rest.trim())
        }
        _ => (MessageType::Data, line),
    };

    ClientMessage {
        r#type,
        lobby: lobby.to_string(),
        game: game.to_string(),
        data: payload_from_text(text),
    }
}

/// Parse text as a JSON payload, wrapping anything that is not JSON as `{"text": ...}`.
fn payload_from_text(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "text": text }))
}
