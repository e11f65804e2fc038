//! UseCase: プレイヤー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPlayerUseCase::execute() メソッド
//! - 接続の受付（上限チェック、ID 採番）と connected 通知
//!
//! ### なぜこのテストが必要か
//! - connected 通知は他のどのメッセージよりも先に届く必要がある
//! - 上限超過時には何も送らずに拒否することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規プレイヤーの接続
//! - 異常系：同時接続数の上限超過

use std::sync::Arc;

use crate::domain::{
    ConnectError, LobbyRepository, MessagePusher, OutboundMessage, PlayerId, PusherChannel,
};

/// プレイヤー接続のユースケース
pub struct ConnectPlayerUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPlayerUseCase {
    /// 新しい ConnectPlayerUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// プレイヤー接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - プレイヤーへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(PlayerId)` - 接続成功（採番された ID）。connected 通知は送信済み
    /// * `Err(ConnectError)` - 同時接続数の上限超過
    pub async fn execute(&self, sender: PusherChannel) -> Result<PlayerId, ConnectError> {
        // 1. レジストリに登録（上限チェックと採番）
        let player_id = self.repository.register_player().await?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher.register_client(player_id, sender).await;

        // 3. 他のメッセージより先に connected を送る
        if let Err(e) = self
            .message_pusher
            .push_to(player_id, &OutboundMessage::Connected)
            .await
        {
            tracing::warn!("Failed to send connected to player {}: {}", player_id, e);
        }

        Ok(player_id)
    }
}
