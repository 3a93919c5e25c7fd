//! Inbound frame classification.

use std::sync::LazyLock;

use regex::Regex;

use super::ExternalSongId;

static BEARER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Bearer\s+([a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+)$")
        .expect("bearer token pattern is valid")
});

static SONG_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("song url pattern is valid")
});

/// What an inbound text frame means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// `Bearer <header>.<payload>.<signature>`; holds the bare token
    Credential(String),
    /// A recognized song link; holds the provider's song id
    SongRequest(ExternalSongId),
    /// Anything else is chat text
    Text(String),
}

impl InboundFrame {
    pub fn classify(raw: &str) -> Self {
        if let Some(token) = match_bearer_token(raw) {
            return Self::Credential(token);
        }
        if let Some(song_id) = match_song_url(raw) {
            return Self::SongRequest(song_id);
        }
        Self::Text(raw.to_string())
    }
}

/// Extract the token from an `Authorization`-style `Bearer` value.
pub fn match_bearer_token(value: &str) -> Option<String> {
    BEARER_TOKEN
        .captures(value.trim())
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
}

fn match_song_url(value: &str) -> Option<ExternalSongId> {
    SONG_URL
        .captures(value)
        .and_then(|captures| captures.get(1))
        .and_then(|id| ExternalSongId::new(id.as_str().to_string()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_id(value: &str) -> ExternalSongId {
        ExternalSongId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_classify_bearer_credential() {
        // テスト項目: 3 パートの Bearer トークンはクレデンシャルとして分類される
        // given (前提条件):
        let raw = "Bearer aaa.bbb-b.c_cc";

        // when (操作):
        let frame = InboundFrame::classify(raw);

        // then (期待する結果):
        assert_eq!(frame, InboundFrame::Credential("aaa.bbb-b.c_cc".to_string()));
    }

    #[test]
    fn test_classify_two_part_token_as_text() {
        // テスト項目: 3 パートでない Bearer 文字列はテキスト扱いになる
        // given (前提条件):
        let raw = "Bearer aaa.bbb";

        // when (操作):
        let frame = InboundFrame::classify(raw);

        // then (期待する結果):
        assert_eq!(frame, InboundFrame::Text(raw.to_string()));
    }

    #[test]
    fn test_classify_song_urls() {
        // テスト項目: 各種 YouTube URL から動画 ID が抽出される
        // given (前提条件):
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "check this out https://youtu.be/dQw4w9WgXcQ?t=42",
        ];

        for raw in cases {
            // when (操作):
            let frame = InboundFrame::classify(raw);

            // then (期待する結果):
            assert_eq!(
                frame,
                InboundFrame::SongRequest(song_id("dQw4w9WgXcQ")),
                "input: {raw}"
            );
        }
    }

    #[test]
    fn test_classify_plain_text() {
        // テスト項目: 上記に当てはまらないフレームはテキストになる
        // given (前提条件):
        let raw = "hello https://example.com/watch?v=dQw4w9WgXcQ";

        // when (操作):
        let frame = InboundFrame::classify(raw);

        // then (期待する結果):
        assert_eq!(frame, InboundFrame::Text(raw.to_string()));
    }
}
