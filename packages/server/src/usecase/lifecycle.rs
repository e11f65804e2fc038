//! UseCase: 接続ライフサイクルの制御
//!
//! トランスポートから届く open / message / close の 3 種類のイベントを
//! 各ユースケースに振り分ける。トランスポート（WebSocket）には依存しないため、
//! テストでは合成イベントで駆動できる。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LifecycleController の on_open / on_message / on_close
//! - 作成・参加・中継・リーダー交代までの一連の流れ
//!
//! ### なぜこのテストが必要か
//! - 個々のユースケースが正しくても、イベントの順序で状態が壊れないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人でのロビー作成から中継まで
//! - エッジケース：リーダー切断後の昇格と中継先の切り替え
//! - 異常系：不正な JSON、上限超過の接続

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectError, InboundMessage, PlayerId, PusherChannel};

use super::{
    connect_player::ConnectPlayerUseCase,
    disconnect_player::DisconnectPlayerUseCase,
    route_message::{RouteMessageUseCase, RouteOutcome},
};

/// 接続ライフサイクルのコントローラー
pub struct LifecycleController {
    connect_player_usecase: Arc<ConnectPlayerUseCase>,
    route_message_usecase: Arc<RouteMessageUseCase>,
    disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    /// 状態遷移と送信の順序を揃えるためのロック
    dispatch: Mutex<()>,
}

impl LifecycleController {
    pub fn new(
        connect_player_usecase: Arc<ConnectPlayerUseCase>,
        route_message_usecase: Arc<RouteMessageUseCase>,
        disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    ) -> Self {
        Self {
            connect_player_usecase,
            route_message_usecase,
            disconnect_player_usecase,
            dispatch: Mutex::new(()),
        }
    }

    /// 新しい接続を受け付ける
    ///
    /// 上限超過時は `Err` を返す。呼び出し側は接続を閉じること。
    pub async fn on_open(&self, sender: PusherChannel) -> Result<PlayerId, ConnectError> {
        let player_id = self.connect_player_usecase.execute(sender).await?;
        tracing::info!("Player {} connected", player_id);
        Ok(player_id)
    }

    /// 受信したテキストフレームを処理する
    pub async fn on_message(&self, player_id: PlayerId, raw: &str) -> Option<RouteOutcome> {
        let message = InboundMessage::decode(raw);
        let _dispatch = self.dispatch.lock().await;
        match self.route_message_usecase.execute(player_id, message).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::warn!("Failed to route message from player {}: {}", player_id, e);
                None
            }
        }
    }

    /// 接続の終了を処理する
    pub async fn on_close(&self, player_id: PlayerId) {
        let _dispatch = self.dispatch.lock().await;
        match self.disconnect_player_usecase.execute(player_id).await {
            Ok(_) => tracing::info!("Player {} disconnected", player_id),
            Err(e) => tracing::warn!("Failed to disconnect player {}: {}", player_id, e),
        }
    }
}
