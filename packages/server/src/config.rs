//! Static server configuration.

use std::time::Duration;

use crate::domain::LobbyLimits;

/// Server configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to bind to
    pub port: u16,
    /// Global concurrent-player cap
    pub max_players: usize,
    /// Global lobby cap
    pub max_lobbies: usize,
    /// Lobby membership cap
    pub max_players_per_lobby: usize,
    /// Idle time before a connection is closed (`None` disables the timeout)
    pub player_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = LobbyLimits::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_players: limits.max_players,
            max_lobbies: limits.max_lobbies,
            max_players_per_lobby: limits.max_players_per_lobby,
            player_timeout: Some(Duration::from_secs(12)),
        }
    }
}

impl ServerConfig {
    /// Capacity limits enforced by the lobby state
    pub fn limits(&self) -> LobbyLimits {
        LobbyLimits {
            max_players: self.max_players,
            max_lobbies: self.max_lobbies,
            max_players_per_lobby: self.max_players_per_lobby,
        }
    }

    /// Convert a timeout in whole seconds, where `0` means "never time out"
    pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_defaults() {
        // テスト項目: デフォルト設定がドキュメントの値と一致する
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(
            config.limits(),
            LobbyLimits {
                max_players: 256,
                max_lobbies: 16,
                max_players_per_lobby: 16,
            }
        );
        assert_eq!(config.player_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_zero_timeout_disables_idle_expiry() {
        // テスト項目: タイムアウト 0 秒は無効化を意味する
        // given (前提条件):

        // when (操作):
        let disabled = ServerConfig::timeout_from_secs(0);
        let enabled = ServerConfig::timeout_from_secs(5);

        // then (期待する結果):
        assert_eq!(disabled, None);
        assert_eq!(enabled, Some(Duration::from_secs(5)));
    }
}
