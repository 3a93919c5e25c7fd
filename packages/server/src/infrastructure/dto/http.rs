//! HTTP API request / response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::SongDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummaryDto {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub created_at: Option<String>,
}

/// A history entry; song messages carry the referenced song instead of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<SongDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDetailDto {
    #[serde(flatten)]
    pub summary: ChannelSummaryDto,
    pub messages: Vec<MessageDto>,
}

/// Channel snapshot: history plus what is playing and what comes next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshotDto {
    pub channel: ChannelDetailDto,
    pub last_played_song: Option<SongDto>,
    pub upcoming: Vec<SongDto>,
    /// epoch milliseconds the snapshot was evaluated at
    pub server_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMetadataDto {
    pub song_id: String,
    pub title: String,
    pub thumbnail: String,
    pub iso_duration: String,
    /// seconds
    pub duration: f64,
}
