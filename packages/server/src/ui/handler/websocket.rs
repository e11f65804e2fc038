//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{domain::PlayerId, ui::state::AppState};

/// Accept a player connection and upgrade it to a WebSocket.
///
/// The player is registered before the upgrade so that a full server can
/// answer with `503 Service Unavailable` instead of opening a socket.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    // Create a channel for this player to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    let player_id = match state.lifecycle.on_open(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Refusing connection: {}", e);
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let cleanup_state = state.clone();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!("WebSocket upgrade failed for player {}: {}", player_id, e);
        tokio::spawn(async move { cleanup_state.lifecycle.on_close(player_id).await });
    })
    .on_upgrade(move |socket| handle_socket(socket, state, player_id, rx))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: notices and relayed messages
/// (via rx channel) are sent to this player's WebSocket connection in order.
///
/// # Arguments
///
/// * `rx` - Channel receiver for outbound frames
/// * `sender` - WebSocket sink to send messages to this player
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

/// Spawns a task that feeds inbound frames to the lifecycle controller until
/// the socket closes or the player stays silent longer than the idle timeout.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    player_id: PlayerId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let next = match state.player_timeout {
                Some(limit) => match tokio::time::timeout(limit, receiver.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::info!(
                            "Player {} idle for {:?}, closing connection",
                            player_id,
                            limit
                        );
                        break;
                    }
                },
                None => receiver.next().await,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::debug!("WebSocket error from player {}: {}", player_id, e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => {
                    state.lifecycle.on_message(player_id, text.as_str()).await;
                }
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => {
                        state.lifecycle.on_message(player_id, text).await;
                    }
                    Err(_) => {
                        tracing::debug!("Discarding non-UTF-8 frame from player {}", player_id);
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("Player {} requested close", player_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    player_id: PlayerId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, state.clone(), player_id);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.lifecycle.on_close(player_id).await;
}
