//! Conversion logic from domain entities to DTOs.

use chorus_shared::time::timestamp_to_rfc3339;

use crate::domain::{entity, value_object::MessageContent};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&entity::Song> for ws::SongDto {
    fn from(song: &entity::Song) -> Self {
        Self {
            id: song.id.to_string(),
            song_id: song.external_id.as_str().to_string(),
            title: song.title.clone(),
            thumbnail: song.thumbnail_url.clone(),
            duration: song.duration_secs,
            song_start_time: song.start_time.value(),
        }
    }
}

impl ws::OutboundFrame {
    pub fn chat(message: &entity::Message, content: &MessageContent) -> Self {
        Self::Message {
            id: message.id.to_string(),
            author: message.author.as_str().to_string(),
            content: content.as_str().to_string(),
        }
    }

    pub fn song(message: &entity::Message, song: &entity::Song) -> Self {
        Self::Song {
            id: message.id.to_string(),
            author: message.author.as_str().to_string(),
            content: song.into(),
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&entity::Channel> for http::ChannelSummaryDto {
    fn from(channel: &entity::Channel) -> Self {
        Self {
            id: channel.id.as_str().to_string(),
            name: channel.name.as_str().to_string(),
            owner: channel.owner.as_str().to_string(),
            description: channel.description.clone(),
            created_at: timestamp_to_rfc3339(channel.created_at.value()),
        }
    }
}

impl http::MessageDto {
    /// `song` is the queue entry a song message refers to, if it is still known.
    pub fn from_message(message: &entity::Message, song: Option<&entity::Song>) -> Self {
        let (kind, content) = match &message.body {
            entity::MessageBody::Text(content) => ("message", Some(content.as_str().to_string())),
            entity::MessageBody::Song(_) => ("song", None),
        };
        Self {
            id: message.id.to_string(),
            author: message.author.as_str().to_string(),
            kind: kind.to_string(),
            content,
            song: song.map(ws::SongDto::from),
        }
    }
}

impl From<&entity::SongMetadata> for http::SongMetadataDto {
    fn from(metadata: &entity::SongMetadata) -> Self {
        let duration = crate::domain::duration::parse_iso_duration(&metadata.iso_duration)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Self {
            song_id: metadata.external_id.as_str().to_string(),
            title: metadata.title.clone(),
            thumbnail: metadata.thumbnail_url.clone(),
            iso_duration: metadata.iso_duration.clone(),
            duration,
        }
    }
}
