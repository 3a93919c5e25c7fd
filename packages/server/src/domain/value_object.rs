//! Value Object 定義
//!
//! 生の文字列や数値を検証済みの型で包み、ドメイン層で不正な値が流通しないようにします。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

const MAX_CHANNEL_ID_LEN: usize = 64;
const MAX_USER_ID_LEN: usize = 30;
const MAX_CHANNEL_NAME_LEN: usize = 100;
const MAX_MESSAGE_CONTENT_LEN: usize = 2000;
const EXTERNAL_SONG_ID_LEN: usize = 11;

fn validate_non_empty(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(ValueObjectError::TooLong {
            field,
            max: max_len,
            actual: len,
        });
    }
    Ok(())
}

/// チャンネル ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_non_empty("channel_id", &value, MAX_CHANNEL_ID_LEN)?;
        Ok(Self(value))
    }

    /// 新しいチャンネル ID を発行
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 認証済みユーザーの ID（クレデンシャル検証の結果として得られる）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_non_empty("user_id", &value, MAX_USER_ID_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャンネル名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_non_empty("channel_name", &value, MAX_CHANNEL_NAME_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// テキストメッセージの本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_non_empty("content", &value, MAX_MESSAGE_CONTENT_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 外部プロバイダ（YouTube）の動画 ID
///
/// 11 文字の `[A-Za-z0-9_-]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalSongId(String);

impl ExternalSongId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == EXTERNAL_SONG_ID_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ValueObjectError::InvalidFormat {
                field: "song_id",
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExternalSongId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ExternalSongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// キュー内の曲の内部 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(Uuid);

impl SongId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// メッセージ ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix epoch からのミリ秒
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `seconds` 秒後の時刻（ミリ秒未満は切り捨て、`i64` の範囲で飽和）
    pub fn plus_seconds(&self, seconds: f64) -> Self {
        // f64 -> i64 の `as` は範囲外で飽和する
        let millis = (seconds * 1000.0) as i64;
        Self(self.0.saturating_add(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_rejects_empty() {
        // テスト項目: 空文字列のチャンネル ID は作成できない
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = ChannelId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("channel_id")));
    }

    #[test]
    fn test_user_id_rejects_too_long() {
        // テスト項目: 30 文字を超えるユーザー ID は作成できない
        // given (前提条件):
        let value = "a".repeat(31);

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "user_id",
                max: 30,
                actual: 31
            })
        );
    }

    #[test]
    fn test_external_song_id_accepts_youtube_id() {
        // テスト項目: 11 文字の YouTube 動画 ID が受け入れられる
        // given (前提条件):
        let value = "dQw4w9WgXcQ".to_string();

        // when (操作):
        let result = ExternalSongId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_external_song_id_rejects_wrong_length_and_charset() {
        // テスト項目: 長さや文字種が不正な動画 ID は拒否される
        // given (前提条件):
        let too_short = "abc".to_string();
        let bad_chars = "dQw4w9WgXc!".to_string();

        // when (操作):
        let short_result = ExternalSongId::new(too_short);
        let chars_result = ExternalSongId::new(bad_chars);

        // then (期待する結果):
        assert!(short_result.is_err());
        assert!(chars_result.is_err());
    }

    #[test]
    fn test_timestamp_plus_fractional_seconds() {
        // テスト項目: 小数秒を加算するとミリ秒単位で切り捨てられる
        // given (前提条件):
        let ts = Timestamp::new(1_000);

        // when (操作):
        let later = ts.plus_seconds(1.2345);

        // then (期待する結果):
        assert_eq!(later.value(), 2_234);
    }

    #[test]
    fn test_timestamp_plus_huge_seconds_saturates() {
        // テスト項目: 表現できないほど先の時刻はオーバーフローせず最大値に張り付く
        // given (前提条件):
        let ts = Timestamp::new(1_700_000_000_000);

        // when (操作):
        let later = ts.plus_seconds(200_000_000_000.0 * 86_400.0);

        // then (期待する結果):
        assert_eq!(later.value(), i64::MAX);
    }
}
