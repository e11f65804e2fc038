//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! `RelayState` 全体を 1 つの Mutex で保護し、全ての変更を直列化します。
//!
//! ## 設計ノート
//!
//! ロビーごとにロックを分ける構成も可能ですが、受付・参加・切断は
//! 接続レジストリとロビーディレクトリの両方を変更するため、
//! ロック 1 つでまとめて保護しています。

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::Clock;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::{
    Admission, ConnectError, Departure, GameTag, Lobby, LobbyName, LobbyRepository, Membership,
    PlayerId, RelayError, RelayState, ServerStatus, Timestamp,
};

/// インメモリ Lobby Repository 実装
pub struct InMemoryLobbyRepository {
    /// リレー全体の状態
    state: Arc<Mutex<RelayState>>,
    /// ロビー作成時刻の取得に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new(state: Arc<Mutex<RelayState>>, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn register_player(&self) -> Result<PlayerId, ConnectError> {
        let mut state = self.state.lock().await;
        state.accept()
    }

    async fn remove_player(&self, player_id: PlayerId) -> Result<Departure, RelayError> {
        let mut state = self.state.lock().await;
        state.disconnect(player_id)
    }

    async fn get_membership(&self, player_id: PlayerId) -> Result<Membership, RelayError> {
        let state = self.state.lock().await;
        state.membership(player_id)
    }

    async fn store_initialization_snapshot(
        &self,
        player_id: PlayerId,
        snapshot: Value,
    ) -> Result<bool, RelayError> {
        let mut state = self.state.lock().await;
        state.store_initialization_snapshot(player_id, snapshot)
    }

    async fn join_or_create(
        &self,
        player_id: PlayerId,
        lobby: LobbyName,
        game_tag: GameTag,
    ) -> Result<Admission, RelayError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut state = self.state.lock().await;
        state.join_or_create(player_id, lobby, game_tag, now)
    }

    async fn get_status(&self) -> ServerStatus {
        let state = self.state.lock().await;
        state.status()
    }

    async fn get_lobbies(&self) -> Vec<Lobby> {
        let state = self.state.lock().await;
        state.lobbies()
    }

    async fn get_lobby(&self, name: &LobbyName) -> Option<Lobby> {
        let state = self.state.lock().await;
        state.lobby(name)
    }
}
