//! UseCase: 曲のリクエスト
//!
//! チャンネルの存在確認 → メタデータ解決 → 再生時刻の決定 → キューの条件付き置換 → 履歴への追記 → 配信。
//! キューの置換が競合した場合は読み直してスケジュールをやり直す。

use std::sync::Arc;

use crate::{
    domain::{
        ChannelId, ChannelRepository, ConnectionRegistry, ExternalSongId, Message, MessageLog,
        PendingSong, QueueScheduler, QueueStore, RepositoryError, Song, SongMetadataResolver,
        UserId,
    },
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{broadcast_best_effort, error::SessionError};

/// 競合時に load → schedule → replace をやり直す上限
pub const MAX_SCHEDULE_ATTEMPTS: usize = 3;

/// 曲リクエストのユースケース
pub struct RequestSongUseCase {
    channels: Arc<dyn ChannelRepository>,
    resolver: Arc<dyn SongMetadataResolver>,
    queue_store: Arc<dyn QueueStore>,
    message_log: Arc<dyn MessageLog>,
    registry: Arc<dyn ConnectionRegistry>,
    scheduler: QueueScheduler,
}

impl RequestSongUseCase {
    pub fn new(
        channels: Arc<dyn ChannelRepository>,
        resolver: Arc<dyn SongMetadataResolver>,
        queue_store: Arc<dyn QueueStore>,
        message_log: Arc<dyn MessageLog>,
        registry: Arc<dyn ConnectionRegistry>,
        scheduler: QueueScheduler,
    ) -> Self {
        Self {
            channels,
            resolver,
            queue_store,
            message_log,
            registry,
            scheduler,
        }
    }

    /// 曲をキューに追加し、曲メッセージを履歴に残して配信する
    ///
    /// チャンネルが存在しない、メタデータが取れない、または再生時間が解釈できない
    /// 場合は何も保存しない。
    pub async fn execute(
        &self,
        channel_id: &ChannelId,
        author: UserId,
        song_id: ExternalSongId,
    ) -> Result<Song, SessionError> {
        self.ensure_channel(channel_id).await?;

        let metadata = self.resolver.resolve(&song_id).await?;
        let pending = PendingSong::from_metadata(metadata)?;

        let song = self.enqueue(channel_id, pending).await?;
        tracing::info!(
            "Song '{}' ({}) queued on channel '{}' at {}",
            song.title,
            song.external_id,
            channel_id,
            song.start_time.value()
        );

        let message = Message::song(author, song.id);
        self.message_log
            .append(channel_id, message.clone())
            .await
            .map_err(SessionError::PersistenceFailure)?;

        let payload = OutboundFrame::song(&message, &song).to_json()?;
        broadcast_best_effort(self.registry.as_ref(), channel_id, &payload).await;

        Ok(song)
    }

    async fn ensure_channel(&self, channel_id: &ChannelId) -> Result<(), SessionError> {
        match self.channels.find(channel_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(SessionError::PersistenceFailure(
                RepositoryError::ChannelNotFound(channel_id.clone()),
            )),
            Err(e) => Err(SessionError::PersistenceFailure(e)),
        }
    }

    async fn enqueue(
        &self,
        channel_id: &ChannelId,
        pending: PendingSong,
    ) -> Result<Song, SessionError> {
        for attempt in 1..=MAX_SCHEDULE_ATTEMPTS {
            let loaded = self
                .queue_store
                .load(channel_id)
                .await
                .map_err(SessionError::PersistenceFailure)?;
            let mut queue = match loaded {
                Some(queue) => queue,
                None => self
                    .queue_store
                    .create(channel_id)
                    .await
                    .map_err(SessionError::PersistenceFailure)?,
            };

            let song = self.scheduler.schedule(&mut queue, pending.clone());

            match self.queue_store.replace(channel_id, queue).await {
                Ok(_) => return Ok(song),
                Err(RepositoryError::Conflict {
                    expected, actual, ..
                }) => {
                    tracing::debug!(
                        "Queue of channel '{}' changed during scheduling (attempt {}/{}, expected version {}, found {})",
                        channel_id,
                        attempt,
                        MAX_SCHEDULE_ATTEMPTS,
                        expected,
                        actual
                    );
                }
                Err(e) => return Err(SessionError::PersistenceFailure(e)),
            }
        }

        Err(SessionError::Conflict {
            attempts: MAX_SCHEDULE_ATTEMPTS,
        })
    }
}
