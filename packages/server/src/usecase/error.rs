//! UseCase 層のエラー定義

use thiserror::Error;

/// ロビー詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetLobbyDetailError {
    /// ロビー名が不正（空）
    #[error("invalid lobby name")]
    InvalidName,

    /// ロビーが存在しない
    #[error("lobby not found")]
    LobbyNotFound,
}
