//! リレー全体の状態
//!
//! 接続レジストリとロビーディレクトリをまとめて所有し、複数の構成要素に
//! またがる操作を 1 つのメソッドとして提供する。Repository はこの型を
//! 1 つのロックで保護することで、途中状態が他の接続から見えないようにする。

use serde_json::Value;

use super::{
    directory::{LeaveOutcome, LobbyDirectory},
    entity::Lobby,
    error::{ConnectError, RelayError},
    registry::ConnectionRegistry,
    value_object::{GameTag, LobbyLimits, LobbyName, PlayerId, Timestamp},
};

/// 送信者のロビー内での立場
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// どのロビーにも所属していない
    Unassigned,
    /// リーダー。`followers` は参加順
    Leader {
        lobby: LobbyName,
        followers: Vec<PlayerId>,
    },
    /// フォロワー。`leader` が `None` になるのはリーダー不在の瞬間のみ
    Follower {
        lobby: LobbyName,
        leader: Option<PlayerId>,
    },
}

/// 参加要求の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// 新しいロビーを作成し、リーダーになった
    Created { lobby: LobbyName },
    /// 既存のロビーにフォロワーとして参加した
    Joined { lobby: LobbyName, snapshot: Value },
}

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub player_id: PlayerId,
    pub was_leader: bool,
    pub outcome: LeaveOutcome,
}

/// サーバー状態の読み取り専用スナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStatus {
    pub players: usize,
    pub lobbies: usize,
    pub next_player_id: PlayerId,
}

/// リレー全体の状態
#[derive(Debug)]
pub struct RelayState {
    registry: ConnectionRegistry,
    directory: LobbyDirectory,
}

impl RelayState {
    pub fn new(limits: LobbyLimits) -> Self {
        Self {
            registry: ConnectionRegistry::new(limits.max_players),
            directory: LobbyDirectory::new(limits.max_lobbies, limits.max_players_per_lobby),
        }
    }

    /// 新しい接続を受け付ける
    pub fn accept(&mut self) -> Result<PlayerId, ConnectError> {
        self.registry.accept()
    }

    /// プレイヤーの現在の立場を返す
    pub fn membership(&self, player_id: PlayerId) -> Result<Membership, RelayError> {
        let player = self
            .registry
            .get(player_id)
            .ok_or(RelayError::PlayerNotFound(player_id))?;

        let Some(lobby) = player
            .current_lobby
            .as_ref()
            .and_then(|name| self.directory.find(name))
        else {
            return Ok(Membership::Unassigned);
        };

        if lobby.is_leader(player_id) {
            Ok(Membership::Leader {
                lobby: lobby.name.clone(),
                followers: lobby.followers(),
            })
        } else {
            Ok(Membership::Follower {
                lobby: lobby.name.clone(),
                leader: lobby.leader(),
            })
        }
    }

    /// リーダーであれば初期化スナップショットを保存する
    ///
    /// リーダーでない場合は何もせず `false` を返す。
    pub fn store_initialization_snapshot(
        &mut self,
        player_id: PlayerId,
        snapshot: Value,
    ) -> Result<bool, RelayError> {
        let player = self
            .registry
            .get(player_id)
            .ok_or(RelayError::PlayerNotFound(player_id))?;

        let Some(lobby) = player
            .current_lobby
            .as_ref()
            .and_then(|name| self.directory.find_mut(name))
        else {
            return Ok(false);
        };
        if !lobby.is_leader(player_id) {
            return Ok(false);
        }

        lobby.initialization_snapshot = snapshot;
        Ok(true)
    }

    /// 名前のロビーが無ければ作成し、あれば参加する
    pub fn join_or_create(
        &mut self,
        player_id: PlayerId,
        name: LobbyName,
        game_tag: GameTag,
        now: Timestamp,
    ) -> Result<Admission, RelayError> {
        let player = self
            .registry
            .get_mut(player_id)
            .ok_or(RelayError::PlayerNotFound(player_id))?;

        if self.directory.find(&name).is_none() {
            let lobby = self.directory.create(player, name, game_tag, now)?;
            return Ok(Admission::Created {
                lobby: lobby.name.clone(),
            });
        }

        let lobby = self.directory.join(player, &name, &game_tag)?;
        Ok(Admission::Joined {
            lobby: lobby.name.clone(),
            snapshot: lobby.initialization_snapshot.clone(),
        })
    }

    /// 切断されたプレイヤーをロビーから外し、登録解除する
    pub fn disconnect(&mut self, player_id: PlayerId) -> Result<Departure, RelayError> {
        let player = self
            .registry
            .get_mut(player_id)
            .ok_or(RelayError::PlayerNotFound(player_id))?;

        // leave の前にリーダーだったかを記録しておく
        let was_leader = player
            .current_lobby
            .as_ref()
            .and_then(|name| self.directory.find(name))
            .is_some_and(|lobby| lobby.is_leader(player_id));
        let outcome = self.directory.leave(player);
        self.registry.release(player_id);

        Ok(Departure {
            player_id,
            was_leader,
            outcome,
        })
    }

    pub fn status(&self) -> ServerStatus {
        ServerStatus {
            players: self.registry.live_count(),
            lobbies: self.directory.len(),
            next_player_id: self.registry.next_id(),
        }
    }

    pub fn lobbies(&self) -> Vec<Lobby> {
        let mut lobbies: Vec<Lobby> = self.directory.iter().cloned().collect();
        lobbies.sort_by(|a, b| a.name.cmp(&b.name));
        lobbies
    }

    pub fn lobby(&self, name: &LobbyName) -> Option<Lobby> {
        self.directory.find(name).cloned()
    }
}
