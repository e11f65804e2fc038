//! Shared application state for request handlers.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    GetLobbiesUseCase, GetLobbyDetailUseCase, GetServerStatusUseCase, LifecycleController,
};

/// Shared application state
pub struct AppState {
    /// LifecycleController（接続・受信・切断のイベント処理）
    pub lifecycle: Arc<LifecycleController>,
    /// GetServerStatusUseCase（サーバーステータス取得のユースケース）
    pub get_server_status_usecase: Arc<GetServerStatusUseCase>,
    /// GetLobbiesUseCase（ロビー一覧取得のユースケース）
    pub get_lobbies_usecase: Arc<GetLobbiesUseCase>,
    /// GetLobbyDetailUseCase（ロビー詳細取得のユースケース）
    pub get_lobby_detail_usecase: Arc<GetLobbyDetailUseCase>,
    /// Idle time before a connection is closed
    pub player_timeout: Option<Duration>,
}
