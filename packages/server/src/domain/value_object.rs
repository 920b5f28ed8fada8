//! Value Object 定義
//!
//! 識別子とタイムスタンプを型で区別し、空文字列や極端に長い値を境界で弾きます。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Upper bound for any client-supplied identifier (bytes).
pub const MAX_IDENTIFIER_LENGTH: usize = 256;

fn validate_identifier(value: &str, kind: &'static str) -> Result<(), ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty(kind));
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValueObjectError::TooLong {
            kind,
            max: MAX_IDENTIFIER_LENGTH,
        });
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                validate_identifier(&value, $kind)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Client-supplied room (meeting) identifier.
    RoomId,
    "room id"
);

identifier!(
    /// Display identifier chosen by the participant at join time.
    ///
    /// Not verified to be unique: two people may pick the same one.
    ParticipantId,
    "participant id"
);

identifier!(
    /// Handle of one live WebSocket connection, assigned by the server.
    ConnectionId,
    "connection id"
);

/// Generates fresh connection handles.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0.saturating_add(secs.saturating_mul(1000)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rejects_empty_and_blank() {
        // テスト項目: 空文字列・空白のみの識別子は拒否される
        // given (前提条件):
        let empty = String::new();
        let blank = "   ".to_string();

        // when (操作):
        let empty_result = RoomId::new(empty);
        let blank_result = ParticipantId::new(blank);

        // then (期待する結果):
        assert_eq!(empty_result, Err(ValueObjectError::Empty("room id")));
        assert_eq!(blank_result, Err(ValueObjectError::Empty("participant id")));
    }

    #[test]
    fn test_identifier_rejects_too_long() {
        // テスト項目: 上限を超える長さの識別子は拒否される
        // given (前提条件):
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);

        // when (操作):
        let result = RoomId::new(long);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueObjectError::TooLong { .. })));
    }

    #[test]
    fn test_identifier_preserves_value() {
        // テスト項目: 有効な識別子は値がそのまま保持される
        // given (前提条件):
        let value = "alice@example.com".to_string();

        // when (操作):
        let id = ParticipantId::try_from(value.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(id.as_str(), value);
        assert_eq!(id.to_string(), value);
        assert_eq!(id.into_string(), value);
    }

    #[test]
    fn test_connection_id_factory_generates_unique_handles() {
        // テスト項目: 接続ハンドルは毎回異なる値が生成される
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn test_timestamp_plus_secs() {
        // テスト項目: 秒数の加算がミリ秒に換算される
        // given (前提条件):
        let t0 = Timestamp::new(1_000);

        // when (操作):
        let later = t0.plus_secs(30);

        // then (期待する結果):
        assert_eq!(later.value(), 31_000);
        assert!(later > t0);
    }
}
