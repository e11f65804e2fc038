//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 複数の構成要素にまたがる変更（受付・参加・切断など）は 1 回の呼び出しで
//! アトミックに行われ、途中状態が他の接続から観測されることはない。

use async_trait::async_trait;
use serde_json::Value;

use super::{
    Admission, ConnectError, Departure, GameTag, Lobby, LobbyName, Membership, PlayerId,
    RelayError, ServerStatus,
};

/// Lobby Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// 新しい接続をプレイヤーとして登録
    async fn register_player(&self) -> Result<PlayerId, ConnectError>;

    /// プレイヤーをロビーから外し、登録解除
    async fn remove_player(&self, player_id: PlayerId) -> Result<Departure, RelayError>;

    /// プレイヤーの現在の立場を取得
    async fn get_membership(&self, player_id: PlayerId) -> Result<Membership, RelayError>;

    /// リーダーであれば初期化スナップショットを保存（保存したかを返す）
    async fn store_initialization_snapshot(
        &self,
        player_id: PlayerId,
        snapshot: Value,
    ) -> Result<bool, RelayError>;

    /// ロビーを作成、または既存のロビーに参加
    async fn join_or_create(
        &self,
        player_id: PlayerId,
        lobby: LobbyName,
        game_tag: GameTag,
    ) -> Result<Admission, RelayError>;

    /// サーバー全体のステータスを取得
    async fn get_status(&self) -> ServerStatus;

    /// 全ロビーを取得（名前順）
    async fn get_lobbies(&self) -> Vec<Lobby>;

    /// ロビーを名前で取得
    async fn get_lobby(&self, name: &LobbyName) -> Option<Lobby>;
}
