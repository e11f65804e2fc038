//! UseCase: サーバーステータス取得

use std::sync::Arc;

use crate::domain::{LobbyRepository, ServerStatus};

/// サーバーステータス取得のユースケース
pub struct GetServerStatusUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
}

impl GetServerStatusUseCase {
    /// 新しい GetServerStatusUseCase を作成
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// 接続数・ロビー数・次に採番される ID を取得
    pub async fn execute(&self) -> ServerStatus {
        self.repository.get_status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{GameTag, LobbyLimits, LobbyName, PlayerId, RelayState},
        infrastructure::repository::InMemoryLobbyRepository,
    };
    use hiroba_shared::time::FixedClock;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_get_server_status() {
        // テスト項目: 接続数・ロビー数・次の ID が取得できる
        // given (前提条件):
        let state = Arc::new(Mutex::new(RelayState::new(LobbyLimits::default())));
        let repository = Arc::new(InMemoryLobbyRepository::new(
            state,
            Arc::new(FixedClock::new(0)),
        ));
        let alice = repository.register_player().await.unwrap();
        repository.register_player().await.unwrap();
        repository
            .join_or_create(
                alice,
                LobbyName::new("abc".to_string()).unwrap(),
                GameTag::new("pong"),
            )
            .await
            .unwrap();
        let usecase = GetServerStatusUseCase::new(repository);

        // when (操作):
        let status = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            status,
            ServerStatus {
                players: 2,
                lobbies: 1,
                next_player_id: PlayerId::new(3),
            }
        );
    }
}
