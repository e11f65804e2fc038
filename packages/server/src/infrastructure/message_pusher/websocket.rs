//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 送信メッセージのエンコードと送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 実際のソケットへの書き込みは UI 層の pusher ループが行うため、
//! ここでの送信がブロックすることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, OutboundMessage, PlayerId, PusherChannel},
    infrastructure::dto::conversion::encode_outbound,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone());
///
/// pusher.push_to(player_id, &OutboundMessage::Connected).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のプレイヤーの送信チャンネル
    clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

fn encode(message: &OutboundMessage) -> Result<String, MessagePushError> {
    encode_outbound(message).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(player_id, sender);
        tracing::debug!("Player {} registered to MessagePusher", player_id);
    }

    async fn unregister_client(&self, player_id: PlayerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&player_id);
        tracing::debug!("Player {} unregistered from MessagePusher", player_id);
    }

    async fn push_to(
        &self,
        player_id: PlayerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let content = encode(message)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&player_id)
            .ok_or(MessagePushError::ClientNotFound(player_id))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to player {}", player_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PlayerId>,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let content = encode(message)?;
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push message to player {}: {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to player {}", target);
                }
            } else {
                tracing::warn!("Player {} not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
