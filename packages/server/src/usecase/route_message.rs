//! UseCase: メッセージのルーティング
//!
//! 受信メッセージを分類し、以下の順で処理する。
//!
//! 1. リーダーからの `initialization_data` はスナップショットとして保存（転送しない）
//! 2. `data` 以外は黙って破棄
//! 3. 申告された `game` の変換をペイロードに適用
//! 4. ロビー所属中なら、リーダーは全フォロワーへ、フォロワーはリーダーへ転送
//! 5. 未所属なら参加要求として扱い、ロビーを作成または参加する
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteMessageUseCase::execute() の各分岐
//!
//! ### なぜこのテストが必要か
//! - 「ロビー未所属の data は参加要求」という分岐がプロトコルの中心
//! - 転送先（送信者を除く全員／リーダーのみ）を取り違えると対戦が成立しない
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成・参加・ブロードキャスト・リーダーへの転送・スナップショット
//! - 異常系：空のロビー名、ゲーム不一致、満員、未知の type
//! - エッジケース：リーダー交代後のフォロワーからの送信

use std::sync::Arc;

use crate::domain::{
    Admission, GameTag, GameTransformRegistry, InboundMessage, LobbyError, LobbyName,
    LobbyRepository, Membership, MessageKind, MessagePusher, OutboundMessage, PlayerId,
    RelayError,
};

/// ルーティングの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// リーダーの初期化スナップショットを保存した
    SnapshotStored,
    /// 破棄した（未知の type、リーダー以外の initialization_data）
    Ignored,
    /// リーダーから全フォロワーへ転送した
    Broadcast { targets: Vec<PlayerId> },
    /// フォロワーからリーダーへ転送した
    ForwardedToLeader { leader: PlayerId },
    /// リーダー不在のため破棄した
    Dropped,
    /// ロビーを作成しリーダーになった
    Created { lobby: LobbyName },
    /// ロビーに参加した
    Joined { lobby: LobbyName },
    /// 参加要求を拒否した（error を返信済み）
    Rejected(LobbyError),
}

/// メッセージルーティングのユースケース
pub struct RouteMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// ゲームごとのペイロード変換
    transforms: Arc<GameTransformRegistry>,
}

impl RouteMessageUseCase {
    /// 新しい RouteMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        transforms: Arc<GameTransformRegistry>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            transforms,
        }
    }

    /// メッセージのルーティングを実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者のプレイヤー ID
    /// * `message` - デコード済みの受信メッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(RouteOutcome)` - 処理結果
    /// * `Err(RelayError)` - 送信者が登録されていない
    pub async fn execute(
        &self,
        sender: PlayerId,
        message: InboundMessage,
    ) -> Result<RouteOutcome, RelayError> {
        match message.kind() {
            MessageKind::InitializationData => {
                let stored = self
                    .repository
                    .store_initialization_snapshot(sender, message.payload())
                    .await?;
                if stored {
                    tracing::debug!("Stored initialization data from leader {}", sender);
                    return Ok(RouteOutcome::SnapshotStored);
                }
                tracing::debug!("Ignoring initialization data from non-leader {}", sender);
                return Ok(RouteOutcome::Ignored);
            }
            MessageKind::Unrecognized => {
                tracing::debug!("Ignoring unrecognized message from player {}", sender);
                return Ok(RouteOutcome::Ignored);
            }
            MessageKind::Data => {}
        }

        let game = message.game().to_string();
        let message = self.transforms.transform(&game, message);

        match self.repository.get_membership(sender).await? {
            Membership::Leader { lobby, followers } => {
                tracing::debug!(
                    "Forwarding from leader {} to {} followers in '{}'",
                    sender,
                    followers.len(),
                    lobby
                );
                let relay = OutboundMessage::Relay {
                    document: message.into_document(),
                };
                if let Err(e) = self
                    .message_pusher
                    .broadcast(followers.clone(), &relay)
                    .await
                {
                    tracing::warn!("Failed to broadcast in '{}': {}", lobby, e);
                }
                Ok(RouteOutcome::Broadcast { targets: followers })
            }
            Membership::Follower {
                lobby,
                leader: Some(leader),
            } => {
                tracing::debug!(
                    "Forwarding from follower {} to leader {} in '{}'",
                    sender,
                    leader,
                    lobby
                );
                let relay = OutboundMessage::Relay {
                    document: message.into_document(),
                };
                self.push(leader, &relay).await;
                Ok(RouteOutcome::ForwardedToLeader { leader })
            }
            Membership::Follower {
                lobby,
                leader: None,
            } => {
                tracing::debug!("Dropping message from {}: '{}' has no leader", sender, lobby);
                Ok(RouteOutcome::Dropped)
            }
            Membership::Unassigned => self.admit(sender, &message).await,
        }
    }

    /// 未所属プレイヤーのメッセージを参加要求として処理する
    async fn admit(
        &self,
        sender: PlayerId,
        message: &InboundMessage,
    ) -> Result<RouteOutcome, RelayError> {
        let lobby = match LobbyName::try_from(message.lobby()) {
            Ok(lobby) => lobby,
            Err(e) => return Ok(self.reject(sender, e).await),
        };

        match self
            .repository
            .join_or_create(sender, lobby, GameTag::new(message.game()))
            .await
        {
            Ok(Admission::Created { lobby }) => {
                tracing::info!("Player {} created lobby '{}'", sender, lobby);
                self.push(
                    sender,
                    &OutboundMessage::JoinAccepted {
                        lobby: lobby.clone(),
                        player_id: sender,
                        is_leader: true,
                    },
                )
                .await;
                Ok(RouteOutcome::Created { lobby })
            }
            Ok(Admission::Joined { lobby, snapshot }) => {
                tracing::info!("Player {} joined lobby '{}'", sender, lobby);
                self.push(
                    sender,
                    &OutboundMessage::JoinAccepted {
                        lobby: lobby.clone(),
                        player_id: sender,
                        is_leader: false,
                    },
                )
                .await;
                self.push(sender, &OutboundMessage::Snapshot { data: snapshot })
                    .await;
                Ok(RouteOutcome::Joined { lobby })
            }
            Err(RelayError::Lobby(e)) => Ok(self.reject(sender, e).await),
            Err(e) => Err(e),
        }
    }

    async fn reject(&self, sender: PlayerId, reason: LobbyError) -> RouteOutcome {
        tracing::info!("Rejected join request from player {}: {}", sender, reason);
        self.push(sender, &OutboundMessage::Rejected).await;
        RouteOutcome::Rejected(reason)
    }

    async fn push(&self, target: PlayerId, message: &OutboundMessage) {
        if let Err(e) = self.message_pusher.push_to(target, message).await {
            tracing::warn!("Failed to push message to player {}: {}", target, e);
        }
    }
}
