//! Shared application state.

use std::sync::Arc;

use crate::usecase::{ChannelSync, CreateChannelUseCase, LookupSongUseCase};

/// State handed to every handler
pub struct AppState {
    /// ChannelSync（接続受け付けとスナップショット）
    pub channel_sync: Arc<ChannelSync>,
    /// CreateChannelUseCase（チャンネル作成のユースケース）
    pub create_channel_usecase: Arc<CreateChannelUseCase>,
    /// LookupSongUseCase（曲メタデータ検索のユースケース）
    pub lookup_song_usecase: Arc<LookupSongUseCase>,
}
