//! メッセージの分類
//!
//! 受信メッセージは構造化ドキュメント（JSON オブジェクト）として扱い、
//! ルーティングに必要な `type` / `lobby` / `game` だけを取り出す。
//! それ以外のフィールドは転送時にそのまま保持される。

use serde_json::{Map, Value};

use super::value_object::{LobbyName, PlayerId};

/// 受信メッセージの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Data,
    InitializationData,
    /// 未知の種別・`type` 欠落・パース不能なメッセージ
    Unrecognized,
}

impl MessageKind {
    fn parse(value: &str) -> Self {
        match value {
            "data" => Self::Data,
            "initialization_data" => Self::InitializationData,
            _ => Self::Unrecognized,
        }
    }
}

/// 受信メッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    kind: MessageKind,
    lobby: String,
    game: String,
    document: Map<String, Value>,
}

impl InboundMessage {
    /// 生のテキストをデコードする
    ///
    /// JSON オブジェクトでない入力は `Unrecognized` として扱われる。
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_document(value),
            Err(e) => {
                tracing::debug!("Discarding malformed message: {}", e);
                Self::unrecognized()
            }
        }
    }

    /// 構造化ドキュメントから組み立てる
    pub fn from_document(value: Value) -> Self {
        let Value::Object(document) = value else {
            return Self::unrecognized();
        };

        let text_field = |key: &str| {
            document
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let kind = document
            .get("type")
            .and_then(Value::as_str)
            .map_or(MessageKind::Unrecognized, MessageKind::parse);
        let lobby = text_field("lobby");
        let game = text_field("game");

        Self {
            kind,
            lobby,
            game,
            document,
        }
    }

    fn unrecognized() -> Self {
        Self {
            kind: MessageKind::Unrecognized,
            lobby: String::new(),
            game: String::new(),
            document: Map::new(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// 宣言されたロビー名（欠落時は空文字列）
    pub fn lobby(&self) -> &str {
        &self.lobby
    }

    /// 宣言されたゲームタグ（欠落時は空文字列）
    pub fn game(&self) -> &str {
        &self.game
    }

    /// `data` フィールド。欠落時は空オブジェクト
    pub fn payload(&self) -> Value {
        self.document
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// `data` フィールドを置き換える。他のフィールドには触れない
    pub fn set_payload(&mut self, payload: Value) {
        self.document.insert("data".to_string(), payload);
    }

    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }
}

/// 送信メッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    /// 接続受付の通知
    Connected,
    /// ロビー作成・参加の成功通知
    JoinAccepted {
        lobby: LobbyName,
        player_id: PlayerId,
        is_leader: bool,
    },
    /// 要求の拒否（データは空）
    Rejected,
    /// 参加直後に送る初期化スナップショット
    Snapshot { data: Value },
    /// リーダー昇格の通知
    Promoted { lobby: LobbyName },
    /// 他のプレイヤーから中継されたメッセージ（ドキュメントをそのまま送る）
    Relay { document: Map<String, Value> },
}
