//! Value Object 定義
//!
//! 同一性を持たず、値そのものが意味を持つ不変オブジェクト。
//! 生成時にバリデーションを行い、不正な値を持つインスタンスを作らせない。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Room ID の最大文字数
pub const ROOM_ID_MAX_LENGTH: usize = 128;

/// ルーム識別子
///
/// 前後の空白を取り除いた上で、空でなく、制御文字を含まず、
/// `ROOM_ID_MAX_LENGTH` 文字以内であることを保証する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成（バリデーション付き）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }

        let length = trimmed.chars().count();
        if length > ROOM_ID_MAX_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                length,
                max: ROOM_ID_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ValueObjectError::RoomIdInvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続識別子
///
/// WebSocket 接続ごとにサーバー側で採番される。クライアントが指定することはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過時間（ミリ秒）。負になることもある。`i64` の範囲で飽和する。
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_simple_identifier() {
        // テスト項目: 通常の文字列から RoomId を作成できる
        // given (前提条件):
        let raw = "movie-night".to_string();

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "movie-night");
    }

    #[test]
    fn test_room_id_trims_surrounding_whitespace() {
        // テスト項目: 前後の空白は取り除かれる
        // given (前提条件):
        let raw = "  R1 \n".to_string();

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "R1");
    }

    #[test]
    fn test_room_id_rejects_empty_and_blank() {
        // テスト項目: 空文字列・空白のみの RoomId はエラーになる
        // given (前提条件):
        let empty = String::new();
        let blank = "   ".to_string();

        // when (操作):
        let empty_result = RoomId::new(empty);
        let blank_result = RoomId::new(blank);

        // then (期待する結果):
        assert_eq!(empty_result, Err(ValueObjectError::RoomIdEmpty));
        assert_eq!(blank_result, Err(ValueObjectError::RoomIdEmpty));
    }

    #[test]
    fn test_room_id_rejects_too_long_value() {
        // テスト項目: 最大文字数を超える RoomId はエラーになる
        // given (前提条件):
        let raw = "a".repeat(ROOM_ID_MAX_LENGTH + 1);

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomIdTooLong {
                length: ROOM_ID_MAX_LENGTH + 1,
                max: ROOM_ID_MAX_LENGTH,
            })
        );
    }

    #[test]
    fn test_room_id_accepts_max_length_value() {
        // テスト項目: ちょうど最大文字数の RoomId は受け付けられる
        // given (前提条件):
        let raw = "あ".repeat(ROOM_ID_MAX_LENGTH);

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_room_id_rejects_control_characters() {
        // テスト項目: 制御文字を含む RoomId はエラーになる
        // given (前提条件):
        let raw = "room\u{0007}bell".to_string();

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::RoomIdInvalidCharacter));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 採番される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_timestamp_millis_since() {
        // テスト項目: 2 つのタイムスタンプの差をミリ秒で取得できる
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(2_500);

        // when (操作):
        let elapsed = later.millis_since(earlier);
        let negative = earlier.millis_since(later);

        // then (期待する結果):
        assert_eq!(elapsed, 1_500);
        assert_eq!(negative, -1_500);
    }

    #[test]
    fn test_timestamp_millis_since_saturates() {
        // テスト項目: 差が i64 の範囲を超える場合は飽和し、パニックしない
        // given (前提条件):
        let now = Timestamp::new(1_700_000_000_000);
        let far_past = Timestamp::new(i64::MIN + 1);

        // when (操作):
        let elapsed = now.millis_since(far_past);
        let negative = far_past.millis_since(now);

        // then (期待する結果):
        assert_eq!(elapsed, i64::MAX);
        assert_eq!(negative, i64::MIN);
    }
}
