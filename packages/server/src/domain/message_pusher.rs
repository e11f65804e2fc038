//! MessagePusher trait 定義
//!
//! プレイヤーへのメッセージ送信（通知）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, OutboundMessage, PlayerId};

/// プレイヤーへの送信チャンネル（エンコード済みのテキストを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信は fire-and-forget。バッファリングと背圧はトランスポート側の責務。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// プレイヤーの送信チャンネルを登録
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel);

    /// プレイヤーの送信チャンネルを登録解除
    async fn unregister_client(&self, player_id: PlayerId);

    /// 特定のプレイヤーにメッセージを送信
    async fn push_to(
        &self,
        player_id: PlayerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;

    /// 複数のプレイヤーに順番にメッセージを送信
    async fn broadcast(
        &self,
        targets: Vec<PlayerId>,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;
}
