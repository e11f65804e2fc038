//! Message formatting utilities for client display.

use chrono::{DateTime, Local};
use serde_json::Value;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the connection acknowledgement
    pub fn format_connected(url: &str) -> String {
        format!("\n* Connected to {}\n", url)
    }

    /// Format a `success` notice
    ///
    /// # Arguments
    ///
    /// * `lobby` - The lobby the notice is about
    /// * `is_leader` - Whether this client leads the lobby
    /// * `player_id` - Our player id; absent on leader-promotion notices
    ///
    /// # Returns
    ///
    /// A formatted string describing our role in the lobby
    pub fn format_join_accepted(lobby: &str, is_leader: bool, player_id: Option<u64>) -> String {
        match (player_id, is_leader) {
            (Some(id), true) => format!("\n* Created lobby '{}' as leader (player {})\n", lobby, id),
            (Some(id), false) => format!("\n* Joined lobby '{}' as follower (player {})\n", lobby, id),
            (None, _) => format!("\n* You are now the leader of lobby '{}'\n", lobby),
        }
    }

    /// Format an `error` notice
    pub fn format_error() -> String {
        "\n! The server rejected the request\n".to_string()
    }

    /// Format a relayed or snapshot `data` payload
    ///
    /// # Arguments
    ///
    /// * `data` - The payload of the message
    /// * `received_at` - Unix timestamp when the message arrived (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the pretty-printed payload
    pub fn format_data(data: &Value, received_at: i64) -> String {
        let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        format!(
            "\n\n------------------------------------------------------------\n\
             {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            body,
            format_local_time(received_at)
        )
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        format!("sent at {}\n", format_local_time(sent_at))
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

/// Render a UTC epoch-millisecond timestamp in the local time zone.
fn format_local_time(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_join_accepted_as_leader() {
        // テスト項目: ロビー作成時はリーダーとして表示される
        // given (前提条件):
        let lobby = "abc";

        // when (操作):
        let result = MessageFormatter::format_join_accepted(lobby, true, Some(1));

        // then (期待する結果):
        assert_eq!(result, "\n* Created lobby 'abc' as leader (player 1)\n");
    }

    #[test]
    fn test_format_join_accepted_as_follower() {
        // テスト項目: 既存ロビーへの参加時はフォロワーとして表示される
        // given (前提条件):
        let lobby = "abc";

        // when (操作):
        let result = MessageFormatter::format_join_accepted(lobby, false, Some(2));

        // then (期待する結果):
        assert!(result.contains("Joined lobby 'abc' as follower (player 2)"));
    }

    #[test]
    fn test_format_promotion() {
        // テスト項目: player_id の無い success は昇格通知として表示される
        // given (前提条件):
        let lobby = "abc";

        // when (操作):
        let result = MessageFormatter::format_join_accepted(lobby, true, None);

        // then (期待する結果):
        assert!(result.contains("now the leader of lobby 'abc'"));
    }

    #[test]
    fn test_format_data_pretty_prints_payload() {
        // テスト項目: ペイロードが整形されて表示され、受信時刻が付く
        // given (前提条件):
        let data = json!({"value": 5});

        // when (操作):
        let result = MessageFormatter::format_data(&data, 1672531200123);

        // then (期待する結果):
        assert!(result.contains("\"value\": 5"));
        assert!(result.contains("received at "));
        assert!(result.contains(".123"));
    }

    #[test]
    fn test_format_local_time_out_of_range_falls_back() {
        // テスト項目: 範囲外のタイムスタンプは数値のまま表示される
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = format_local_time(timestamp);

        // then (期待する結果):
        assert_eq!(result, i64::MAX.to_string());
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: パースできないメッセージは生テキストで表示される
        // given (前提条件):
        let text = "not json";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert_eq!(result, "\n← Received: not json\n");
    }
}
