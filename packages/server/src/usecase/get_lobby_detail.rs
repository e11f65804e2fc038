//! UseCase: ロビー詳細取得

use std::sync::Arc;

use crate::domain::{Lobby, LobbyName, LobbyRepository};

use super::error::GetLobbyDetailError;

/// ロビー詳細取得のユースケース
pub struct GetLobbyDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
}

impl GetLobbyDetailUseCase {
    /// 新しい GetLobbyDetailUseCase を作成
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// ロビー詳細を取得
    ///
    /// # Arguments
    ///
    /// * `name` - ロビー名（文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Lobby)` - ロビーの情報
    /// * `Err(GetLobbyDetailError)` - 名前が不正、またはロビーが存在しない
    pub async fn execute(&self, name: String) -> Result<Lobby, GetLobbyDetailError> {
        let name = LobbyName::new(name).map_err(|_| GetLobbyDetailError::InvalidName)?;
        self.repository
            .get_lobby(&name)
            .await
            .ok_or(GetLobbyDetailError::LobbyNotFound)
    }
}
