//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};

use crate::{
    domain::{ChannelId, MetadataError, frame::match_bearer_token},
    infrastructure::dto::{
        http::{
            ChannelDetailDto, ChannelSnapshotDto, ChannelSummaryDto, CreateChannelRequest,
            MessageDto, SongMetadataDto,
        },
        websocket::SongDto,
    },
    ui::state::AppState,
    usecase::{ChannelSnapshot, CreateChannelError, LookupSongError, SnapshotError},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Channel snapshot: history, the song playing now and the upcoming songs
pub async fn get_channel_snapshot(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> Result<Json<ChannelSnapshotDto>, StatusCode> {
    let channel_id = ChannelId::try_from(channel_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.channel_sync.snapshot(&channel_id).await {
        Ok(snapshot) => Ok(Json(snapshot_to_dto(&snapshot))),
        Err(SnapshotError::ChannelNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(SnapshotError::Repository(e)) => {
            tracing::error!("Failed to load channel '{}': {}", channel_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Create a channel owned by the bearer of the `Authorization` header
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<ChannelSummaryDto>), StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(match_bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match state
        .create_channel_usecase
        .execute(&token, request.name, request.description)
        .await
    {
        Ok(channel) => Ok((StatusCode::CREATED, Json(ChannelSummaryDto::from(&channel)))),
        Err(CreateChannelError::Unauthorized(e)) => {
            tracing::warn!("Channel creation rejected: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(CreateChannelError::InvalidInput(e)) => {
            tracing::warn!("Invalid channel request: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(CreateChannelError::Repository(e)) => {
            tracing::error!("Failed to store channel: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Resolve song metadata for an external song id
pub async fn lookup_song(
    State(state): State<Arc<AppState>>,
    Path(song_id): Path<String>,
) -> Result<Json<SongMetadataDto>, StatusCode> {
    match state.lookup_song_usecase.execute(song_id).await {
        Ok(metadata) => Ok(Json(SongMetadataDto::from(&metadata))),
        Err(LookupSongError::InvalidSongId(_)) => Err(StatusCode::BAD_REQUEST),
        Err(LookupSongError::MetadataUnavailable(MetadataError::NotFound(_))) => {
            Err(StatusCode::NOT_FOUND)
        }
        Err(LookupSongError::MetadataUnavailable(e)) => {
            tracing::warn!("Song lookup failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

// Domain Model から DTO への変換
fn snapshot_to_dto(snapshot: &ChannelSnapshot) -> ChannelSnapshotDto {
    let channel = &snapshot.channel;
    ChannelSnapshotDto {
        channel: ChannelDetailDto {
            summary: ChannelSummaryDto::from(channel),
            messages: channel
                .messages
                .iter()
                .map(|message| MessageDto::from_message(message, snapshot.song_for(message)))
                .collect(),
        },
        last_played_song: snapshot.last_played().map(SongDto::from),
        upcoming: snapshot.upcoming().into_iter().map(SongDto::from).collect(),
        server_time: snapshot.taken_at.value(),
    }
}
