//! ゲーム固有のメッセージ変換
//!
//! ゲームタグごとに、中継前のペイロードを書き換える純粋関数を登録できる。
//! 変換はペイロード（`data`）だけを受け取るため、`type` / `lobby` / `game`
//! を書き換えることはできない。変換が失敗した場合は入力をそのまま返す。

use std::{collections::HashMap, fmt};

use serde_json::{Map, Value};

use super::{error::TransformError, message::InboundMessage};

/// ペイロードの変換関数
pub type GameTransform = fn(&Value) -> Result<Value, TransformError>;

/// ゲームタグ → 変換関数のレジストリ
#[derive(Clone, Default)]
pub struct GameTransformRegistry {
    transforms: HashMap<String, GameTransform>,
}

impl fmt::Debug for GameTransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.transforms.keys()).finish()
    }
}

impl GameTransformRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みの変換を登録したレジストリを作成
    ///
    /// - `increment`: `data.value` を整数に正規化する
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("increment", normalize_counter);
        registry
    }

    /// 変換を登録する。既存の登録があれば置き換えて返す
    pub fn register(
        &mut self,
        game: impl Into<String>,
        transform: GameTransform,
    ) -> Option<GameTransform> {
        self.transforms.insert(game.into(), transform)
    }

    /// `game` に登録された変換をメッセージのペイロードに適用する
    ///
    /// 登録がなければメッセージをそのまま返す。
    pub fn transform(&self, game: &str, mut message: InboundMessage) -> InboundMessage {
        let Some(transform) = self.transforms.get(game) else {
            return message;
        };

        match transform(&message.payload()) {
            Ok(payload) => message.set_payload(payload),
            Err(e) => {
                tracing::warn!("Transform for game '{}' failed, forwarding as-is: {}", game, e);
            }
        }
        message
    }
}

/// `increment` ゲームの変換: `value` を整数に正規化する（欠落時は 0）
pub fn normalize_counter(payload: &Value) -> Result<Value, TransformError> {
    let mut data = match payload {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        _ => return Err(TransformError::NotAnObject),
    };

    let value = match data.get("value") {
        None => 0,
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|v| v as i64))
            .ok_or(TransformError::InvalidField("value"))?,
    };
    data.insert("value".to_string(), Value::from(value));

    Ok(Value::Object(data))
}
