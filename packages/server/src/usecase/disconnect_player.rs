//! UseCase: プレイヤー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPlayerUseCase::execute() メソッド
//! - ロビーからの離脱、リーダー交代、登録解除
//!
//! ### なぜこのテストが必要か
//! - リーダーが抜けたロビーは、次のメンバーが昇格しないと中継が止まる
//! - 空になったロビーが残ると同じ名前で作り直せなくなる
//!
//! ### どのような状況を想定しているか
//! - 正常系：フォロワーの切断、リーダーの切断と昇格通知
//! - エッジケース：最後のメンバーの切断（ロビー削除）、未所属プレイヤーの切断
//! - 異常系：登録されていないプレイヤーの切断

use std::sync::Arc;

use crate::domain::{
    Departure, LeaveOutcome, LobbyRepository, MessagePusher, OutboundMessage, PlayerId,
    RelayError,
};

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPlayerUseCase {
    /// 新しい DisconnectPlayerUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// プレイヤー切断を実行
    ///
    /// # Arguments
    ///
    /// * `player_id` - 切断するプレイヤーの ID
    ///
    /// # Returns
    ///
    /// * `Ok(Departure)` - 切断結果（離脱したロビーと昇格したプレイヤー）
    /// * `Err(RelayError)` - プレイヤーが登録されていない
    pub async fn execute(&self, player_id: PlayerId) -> Result<Departure, RelayError> {
        // 1. 送信チャンネルを先に外す（切断済みの相手には送らない）
        self.message_pusher.unregister_client(player_id).await;

        // 2. ロビー離脱と登録解除を 1 回でまとめて行う
        let departure = self.repository.remove_player(player_id).await?;

        // 3. 昇格したプレイヤーに通知
        match &departure.outcome {
            LeaveOutcome::Left {
                lobby,
                promoted: Some(leader),
            } => {
                tracing::info!(
                    "Player {} promoted to leader of '{}' after {} left",
                    leader,
                    lobby,
                    player_id
                );
                let message = OutboundMessage::Promoted {
                    lobby: lobby.clone(),
                };
                if let Err(e) = self.message_pusher.push_to(*leader, &message).await {
                    tracing::warn!("Failed to notify new leader {}: {}", leader, e);
                }
            }
            LeaveOutcome::Left { lobby, promoted: None } => {
                tracing::info!("Player {} left lobby '{}'", player_id, lobby);
            }
            LeaveOutcome::Closed { lobby } => {
                tracing::info!("Lobby '{}' closed after last member {} left", lobby, player_id);
            }
            LeaveOutcome::NotInLobby => {}
        }

        Ok(departure)
    }
}
