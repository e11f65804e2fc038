//! UseCase: ロビー一覧取得

use std::sync::Arc;

use crate::domain::{Lobby, LobbyRepository};

/// ロビー一覧取得のユースケース
pub struct GetLobbiesUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
}

impl GetLobbiesUseCase {
    /// 新しい GetLobbiesUseCase を作成
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// 全ロビーを名前順に取得
    pub async fn execute(&self) -> Vec<Lobby> {
        self.repository.get_lobbies().await
    }
}
