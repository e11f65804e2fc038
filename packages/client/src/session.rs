//! WebSocket client session management.

use futures_util::{Sink, SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{
    ClientMessage, JoinAckData, MessageType, ServerMessage,
};
use hiroba_shared::time::current_timestamp;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::error::ClientError;

use super::{
    domain::{join_request, message_from_input},
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Run one client session: connect, join the lobby, then relay stdin lines
/// until the user exits or the connection drops.
pub async fn run_client_session(url: &str, lobby: &str, game: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(WsError::Http(response)) if response.status().as_u16() == 503 => {
            return Err(ClientError::Rejected(response.status().to_string()));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to lobby relay at {}", url);

    let (mut write, mut read) = ws_stream.split();

    // The first data message is the join request
    send_message(&mut write, &join_request(lobby, game)).await?;

    println!(
        "\nLobby '{}' ({}). Type JSON or text and press Enter to send; '/init <json>' sets the lobby snapshot. Press Ctrl+C to exit.\n",
        lobby, game
    );

    let url_for_read = url.to_string();
    let lobby_for_read = lobby.to_string();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut joined = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(notice) => match notice.r#type {
                            MessageType::Connected => MessageFormatter::format_connected(&url_for_read),
                            MessageType::Success => {
                                joined = true;
                                match serde_json::from_value::<JoinAckData>(notice.data) {
                                    Ok(ack) => MessageFormatter::format_join_accepted(
                                        notice.lobby.as_deref().unwrap_or(&lobby_for_read),
                                        ack.is_leader,
                                        ack.player_id,
                                    ),
                                    Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                                }
                            }
                            MessageType::Error if !joined => {
                                return ClientError::JoinRejected(lobby_for_read);
                            }
                            MessageType::Error => MessageFormatter::format_error(),
                            MessageType::Data | MessageType::InitializationData => {
                                MessageFormatter::format_data(&notice.data, current_timestamp())
                            }
                        },
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&lobby_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&lobby_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        ClientError::ConnectionError("Connection lost".to_string())
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt = format!("{}> ", lobby);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send to WebSocket
    let lobby_for_write = lobby.to_string();
    let game_for_write = game.to_string();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let message = message_from_input(&line, &lobby_for_write, &game_for_write);
            send_message(&mut write, &message).await?;

            print!(
                "\n{}",
                MessageFormatter::format_sent_confirmation(current_timestamp())
            );
            redisplay_prompt(&lobby_for_write);
        }

        Ok::<(), ClientError>(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result {
                Ok(error) => Err(error),
                Err(e) => Err(ClientError::ConnectionError(e.to_string())),
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result {
                Ok(result) => result,
                Err(e) => Err(ClientError::ConnectionError(e.to_string())),
            }
        }
    }
}

async fn send_message<S>(write: &mut S, message: &ClientMessage) -> Result<(), ClientError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize message: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(format!("Failed to send message: {}", e)))
}
