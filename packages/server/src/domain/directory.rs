//! ロビーディレクトリ
//!
//! ロビー名からロビーへのマッピングを所有する。ロビー数の上限と、
//! 空になったロビーの即時破棄を保証する。

use std::collections::HashMap;

use super::{
    entity::{Lobby, Player},
    error::LobbyError,
    value_object::{GameTag, LobbyName, PlayerId, Timestamp},
};

/// `leave` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// プレイヤーはどのロビーにも所属していなかった
    NotInLobby,
    /// 最後のメンバーが抜けたためロビーを破棄した
    Closed { lobby: LobbyName },
    /// ロビーは存続している。`promoted` はリーダーが抜けた場合の新リーダー
    Left {
        lobby: LobbyName,
        promoted: Option<PlayerId>,
    },
}

/// ロビーディレクトリ
#[derive(Debug)]
pub struct LobbyDirectory {
    lobbies: HashMap<LobbyName, Lobby>,
    max_lobbies: usize,
    max_players_per_lobby: usize,
}

impl LobbyDirectory {
    pub fn new(max_lobbies: usize, max_players_per_lobby: usize) -> Self {
        Self {
            lobbies: HashMap::new(),
            max_lobbies,
            max_players_per_lobby,
        }
    }

    pub fn find(&self, name: &LobbyName) -> Option<&Lobby> {
        self.lobbies.get(name)
    }

    pub fn find_mut(&mut self, name: &LobbyName) -> Option<&mut Lobby> {
        self.lobbies.get_mut(name)
    }

    /// `leader` を唯一のメンバーとするロビーを作成して登録する
    ///
    /// # Errors
    ///
    /// - `AlreadyInLobby`: `leader` が既にロビーに所属している
    /// - `NameTaken`: 同名のロビーが存在する
    /// - `CapacityExceeded`: ロビー数が上限に達している
    pub fn create(
        &mut self,
        leader: &mut Player,
        name: LobbyName,
        game_tag: GameTag,
        created_at: Timestamp,
    ) -> Result<&Lobby, LobbyError> {
        if let Some(current) = &leader.current_lobby {
            return Err(LobbyError::AlreadyInLobby(current.to_string()));
        }
        if self.lobbies.contains_key(&name) {
            return Err(LobbyError::NameTaken(name.into_string()));
        }
        if self.lobbies.len() >= self.max_lobbies {
            return Err(LobbyError::CapacityExceeded {
                max: self.max_lobbies,
            });
        }

        leader.current_lobby = Some(name.clone());
        let lobby = Lobby::new(leader.id, name.clone(), game_tag, created_at);
        Ok(self.lobbies.entry(name).or_insert(lobby))
    }

    /// 既存のロビーに参加する
    ///
    /// 成功時、プレイヤーはメンバーの末尾に追加される。
    /// スナップショットの配信は呼び出し側の責務。
    ///
    /// # Errors
    ///
    /// - `AlreadyInLobby`: `player` が既にロビーに所属している
    /// - `NotFound`: ロビーが存在しない
    /// - `GameMismatch`: ゲームタグが一致しない
    /// - `LobbyFull`: メンバー数が上限に達している
    pub fn join(
        &mut self,
        player: &mut Player,
        name: &LobbyName,
        game_tag: &GameTag,
    ) -> Result<&Lobby, LobbyError> {
        if let Some(current) = &player.current_lobby {
            return Err(LobbyError::AlreadyInLobby(current.to_string()));
        }
        let lobby = self
            .lobbies
            .get_mut(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_string()))?;

        if &lobby.game_tag != game_tag {
            return Err(LobbyError::GameMismatch {
                expected: lobby.game_tag.to_string(),
                actual: game_tag.to_string(),
            });
        }
        if lobby.member_count() >= self.max_players_per_lobby {
            return Err(LobbyError::LobbyFull(name.to_string()));
        }

        lobby.add_member(player.id);
        player.current_lobby = Some(name.clone());
        Ok(lobby)
    }

    /// 所属しているロビーから抜ける
    ///
    /// 未所属なら何もしない。ロビーが空になった場合はディレクトリから削除する。
    pub fn leave(&mut self, player: &mut Player) -> LeaveOutcome {
        let Some(name) = player.current_lobby.take() else {
            return LeaveOutcome::NotInLobby;
        };
        let Some(lobby) = self.lobbies.get_mut(&name) else {
            return LeaveOutcome::NotInLobby;
        };

        let was_leader = lobby.is_leader(player.id);
        lobby.remove_member(player.id);

        if lobby.is_empty() {
            self.lobbies.remove(&name);
            return LeaveOutcome::Closed { lobby: name };
        }

        let promoted = if was_leader { lobby.leader() } else { None };
        LeaveOutcome::Left {
            lobby: name,
            promoted,
        }
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lobby> {
        self.lobbies.values()
    }
}
