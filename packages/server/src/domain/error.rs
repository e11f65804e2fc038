//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::PlayerId;

/// 接続受付時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同時接続プレイヤー数の上限に達している
    #[error("player capacity exceeded (max {max})")]
    CapacityExceeded { max: usize },
}

/// ロビーの作成・参加時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    /// ロビー数の上限に達している
    #[error("lobby capacity exceeded (max {max})")]
    CapacityExceeded { max: usize },

    /// ロビー名が空
    #[error("lobby name must not be empty")]
    InvalidName,

    /// 申告されたゲームタグがロビーのものと一致しない
    #[error("game mismatch: lobby plays '{expected}', request declared '{actual}'")]
    GameMismatch { expected: String, actual: String },

    /// ロビーが満員
    #[error("lobby '{0}' is full")]
    LobbyFull(String),

    /// 同名のロビーが既に存在する
    #[error("lobby '{0}' already exists")]
    NameTaken(String),

    /// ロビーが存在しない
    #[error("lobby '{0}' not found")]
    NotFound(String),

    /// プレイヤーは既にロビーに所属している
    #[error("player is already in lobby '{0}'")]
    AlreadyInLobby(String),
}

/// リレー状態に対する操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 指定されたプレイヤーが接続レジストリに存在しない
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

/// ゲーム固有の変換処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// ペイロードがオブジェクトではない
    #[error("payload is not an object")]
    NotAnObject,

    /// フィールドの型が想定と異なる
    #[error("field '{0}' has an unexpected type")]
    InvalidField(&'static str),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のプレイヤーが登録されていない
    #[error("client {0} not found")]
    ClientNotFound(PlayerId),

    /// チャンネルへの送信に失敗した
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// メッセージのエンコードに失敗した
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
