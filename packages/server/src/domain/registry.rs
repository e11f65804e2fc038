//! 接続レジストリ
//!
//! ライブ接続中のプレイヤーを管理し、ID の採番と同時接続数の上限を担う。

use std::collections::HashMap;

use super::{entity::Player, error::ConnectError, value_object::PlayerId};

/// 接続レジストリ
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// 最後に採番した ID（0 は未採番）
    last_id: u64,
    players: HashMap<PlayerId, Player>,
    max_players: usize,
}

impl ConnectionRegistry {
    pub fn new(max_players: usize) -> Self {
        Self {
            last_id: 0,
            players: HashMap::new(),
            max_players,
        }
    }

    /// 新しい接続をプレイヤーとして受け付ける
    ///
    /// # Errors
    ///
    /// 同時接続数が上限に達している場合は `ConnectError::CapacityExceeded`
    pub fn accept(&mut self) -> Result<PlayerId, ConnectError> {
        if self.players.len() >= self.max_players {
            return Err(ConnectError::CapacityExceeded {
                max: self.max_players,
            });
        }

        self.last_id += 1;
        let id = PlayerId::new(self.last_id);
        self.players.insert(id, Player::new(id));
        Ok(id)
    }

    /// プレイヤーを登録解除する（切断時に 1 度だけ呼ばれる）
    pub fn release(&mut self, player_id: PlayerId) -> Option<Player> {
        self.players.remove(&player_id)
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    pub fn get_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&player_id)
    }

    /// 現在の同時接続数
    pub fn live_count(&self) -> usize {
        self.players.len()
    }

    /// 次に採番される ID
    pub fn next_id(&self) -> PlayerId {
        PlayerId::new(self.last_id + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_assigns_monotonic_ids() {
        // テスト項目: 受け付けるたびに 1 から順に ID が採番される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new(10);

        // when (操作):
        let first = registry.accept().unwrap();
        let second = registry.accept().unwrap();

        // then (期待する結果):
        assert_eq!(first, PlayerId::new(1));
        assert_eq!(second, PlayerId::new(2));
        assert_eq!(registry.live_count(), 2);
        assert_eq!(registry.next_id(), PlayerId::new(3));
        assert!(registry.get(first).unwrap().current_lobby.is_none());
    }

    #[test]
    fn test_accept_rejects_when_full() {
        // テスト項目: 上限に達すると CapacityExceeded になり状態は変わらない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new(1);
        registry.accept().unwrap();

        // when (操作):
        let result = registry.accept();

        // then (期待する結果):
        assert_eq!(result, Err(ConnectError::CapacityExceeded { max: 1 }));
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.next_id(), PlayerId::new(2));
    }

    #[test]
    fn test_ids_are_never_reused_after_release() {
        // テスト項目: 解放後も ID は再利用されない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new(1);
        let first = registry.accept().unwrap();

        // when (操作):
        let released = registry.release(first);
        let second = registry.accept().unwrap();

        // then (期待する結果):
        assert_eq!(released.map(|p| p.id), Some(first));
        assert_eq!(second, PlayerId::new(2));
        assert_eq!(registry.live_count(), 1);
    }
}
