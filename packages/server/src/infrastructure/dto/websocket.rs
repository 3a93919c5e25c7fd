//! WebSocket frame DTOs.
//!
//! Outbound frames are JSON objects tagged by `type`:
//!
//! ```json
//! {"type":"message","id":"…","author":"alice","content":"hi"}
//! {"type":"song","id":"…","author":"alice","content":{"id":"…","song_id":"dQw4w9WgXcQ",…}}
//! {"type":"error","code":"unauthorized","message":"…"}
//! ```

use serde::{Deserialize, Serialize};

/// Song as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDto {
    pub id: String,
    pub song_id: String,
    pub title: String,
    pub thumbnail: String,
    /// seconds
    pub duration: f64,
    /// epoch milliseconds
    pub song_start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundFrame {
    /// Chat text, broadcast to the channel
    Message {
        id: String,
        author: String,
        content: String,
    },
    /// Newly scheduled song, broadcast to the channel
    Song {
        id: String,
        author: String,
        content: SongDto,
    },
    /// Error acknowledgement, sent only to the connection whose frame failed
    Error { code: String, message: String },
}

impl OutboundFrame {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_frame_shape() {
        // テスト項目: テキストフレームが type=message でシリアライズされる
        // given (前提条件):
        let frame = OutboundFrame::Message {
            id: "m1".to_string(),
            author: "alice".to_string(),
            content: "hi".to_string(),
        };

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({"type": "message", "id": "m1", "author": "alice", "content": "hi"})
        );
    }

    #[test]
    fn test_song_frame_shape() {
        // テスト項目: 曲フレームが type=song と曲オブジェクトを含む
        // given (前提条件):
        let frame = OutboundFrame::Song {
            id: "m2".to_string(),
            author: "bob".to_string(),
            content: SongDto {
                id: "s1".to_string(),
                song_id: "dQw4w9WgXcQ".to_string(),
                title: "title".to_string(),
                thumbnail: "thumb".to_string(),
                duration: 212.5,
                song_start_time: 1_000,
            },
        };

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "song");
        assert_eq!(value["author"], "bob");
        assert_eq!(value["content"]["song_id"], "dQw4w9WgXcQ");
        assert_eq!(value["content"]["duration"], 212.5);
        assert_eq!(value["content"]["song_start_time"], 1_000);
    }
}
