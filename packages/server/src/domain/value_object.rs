//! 値オブジェクト
//!
//! プレイヤー ID・ロビー名・ゲームタグ・タイムスタンプなど、
//! 不変で等価性によって比較されるドメインの値を定義します。

use std::fmt;

use super::error::LobbyError;

/// プレイヤー ID
///
/// 接続ごとにプロセス内で一意に採番される。単調増加し、再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ロビー名
///
/// ディレクトリ内のロビーを一意に識別するキー。空文字列は許可しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LobbyName(String);

impl LobbyName {
    /// 新しい LobbyName を作成
    ///
    /// # Errors
    ///
    /// 空文字列の場合は `LobbyError::InvalidName` を返す
    pub fn new(value: String) -> Result<Self, LobbyError> {
        if value.is_empty() {
            return Err(LobbyError::InvalidName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for LobbyName {
    type Error = LobbyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LobbyName {
    type Error = LobbyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for LobbyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ゲームタグ
///
/// ロビーがどのゲームのものかを表す文字列。参加者の申告値と完全一致で比較する。
/// 空文字列も有効なタグとして扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameTag(String);

impl GameTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// サーバー全体の上限値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyLimits {
    /// 同時接続プレイヤー数の上限
    pub max_players: usize,
    /// ロビー数の上限
    pub max_lobbies: usize,
    /// 1 ロビーあたりのメンバー数の上限
    pub max_players_per_lobby: usize,
}

impl Default for LobbyLimits {
    fn default() -> Self {
        Self {
            max_players: 256,
            max_lobbies: 16,
            max_players_per_lobby: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lobby_name_rejects_empty() {
        // テスト項目: 空のロビー名は InvalidName になる
        // given (前提条件):
        let empty = String::new();

        // when (操作):
        let result = LobbyName::new(empty);

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::InvalidName));
    }

    #[test]
    fn test_lobby_name_accepts_any_non_empty_string() {
        // テスト項目: 空でなければ空白や記号を含むロビー名も受け付ける
        // given (前提条件):
        let name = " room #1 ";

        // when (操作):
        let result = LobbyName::try_from(name);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), " room #1 ");
    }

    #[test]
    fn test_game_tag_compares_exactly() {
        // テスト項目: ゲームタグは大文字小文字を区別して比較される
        // given (前提条件):
        let pong = GameTag::new("pong");

        // when (操作):
        let upper = GameTag::new("Pong");

        // then (期待する結果):
        assert_ne!(pong, upper);
        assert_eq!(pong, GameTag::new(String::from("pong")));
    }
}
