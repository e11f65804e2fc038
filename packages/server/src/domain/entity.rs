//! エンティティ
//!
//! - `Player`: 1 つのライブ接続に紐づくプレイヤー
//! - `Lobby`: 名前付きのプレイヤーグループ。先頭のメンバーがリーダー

use serde_json::{Map, Value};

use super::value_object::{GameTag, LobbyName, PlayerId, Timestamp};

/// プレイヤー
///
/// 所属ロビーは名前（キー）だけを保持し、実体は `LobbyDirectory` から引く。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub current_lobby: Option<LobbyName>,
}

impl Player {
    /// 未所属のプレイヤーを作成
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            current_lobby: None,
        }
    }
}

/// ロビー
///
/// `members` は参加順。`members[0]` が常にリーダーで、重複は含まない。
#[derive(Debug, Clone, PartialEq)]
pub struct Lobby {
    pub name: LobbyName,
    pub game_tag: GameTag,
    members: Vec<PlayerId>,
    /// リーダーが `initialization_data` で設定した最新のスナップショット
    pub initialization_snapshot: Value,
    pub created_at: Timestamp,
}

impl Lobby {
    /// `leader` を唯一のメンバーとするロビーを作成
    pub fn new(leader: PlayerId, name: LobbyName, game_tag: GameTag, created_at: Timestamp) -> Self {
        Self {
            name,
            game_tag,
            members: vec![leader],
            initialization_snapshot: Value::Object(Map::new()),
            created_at,
        }
    }

    pub fn leader(&self) -> Option<PlayerId> {
        self.members.first().copied()
    }

    pub fn is_leader(&self, player_id: PlayerId) -> bool {
        self.leader() == Some(player_id)
    }

    /// 参加順のメンバー一覧
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    /// リーダー以外のメンバー（参加順）
    pub fn followers(&self) -> Vec<PlayerId> {
        self.members.iter().skip(1).copied().collect()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.members.contains(&player_id)
    }

    /// 末尾（最も優先度の低い位置）にメンバーを追加
    ///
    /// 既にメンバーなら何もせず `false` を返す。
    pub(crate) fn add_member(&mut self, player_id: PlayerId) -> bool {
        if self.contains(player_id) {
            return false;
        }
        self.members.push(player_id);
        true
    }

    /// メンバーを削除
    ///
    /// 順序は保たれるため、リーダーを削除すると次のメンバーが自動的にリーダーになる。
    pub(crate) fn remove_member(&mut self, player_id: PlayerId) -> bool {
        match self.members.iter().position(|id| *id == player_id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }
}
