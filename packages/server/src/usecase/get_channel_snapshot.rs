//! UseCase: チャンネルのスナップショット取得
//!
//! 新しく参加したクライアントが、プレイヤーを正しい位置から再生できるように
//! 履歴・直近に始まった曲・これからの曲をまとめて返す。

use std::sync::Arc;

use chorus_shared::time::Clock;

use crate::domain::{
    Channel, ChannelId, ChannelRepository, Message, MessageBody, Queue, QueueStore, Song,
    Timestamp,
};

use super::error::SnapshotError;

/// ある時点でのチャンネルの状態
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    pub channel: Channel,
    pub queue: Queue,
    /// スナップショットを評価した時刻
    pub taken_at: Timestamp,
}

impl ChannelSnapshot {
    /// `taken_at` 時点で最後に再生が始まった曲
    pub fn last_played(&self) -> Option<&Song> {
        self.queue.last_played(self.taken_at)
    }

    /// `taken_at` より後に開始する曲（開始時刻順）
    pub fn upcoming(&self) -> Vec<&Song> {
        self.queue.upcoming(self.taken_at)
    }

    /// 曲メッセージが参照しているキュー内の曲
    pub fn song_for(&self, message: &Message) -> Option<&Song> {
        match &message.body {
            MessageBody::Song(song_id) => self.queue.find_song(song_id),
            MessageBody::Text(_) => None,
        }
    }
}

/// スナップショット取得のユースケース
pub struct GetChannelSnapshotUseCase {
    channels: Arc<dyn ChannelRepository>,
    queues: Arc<dyn QueueStore>,
    clock: Arc<dyn Clock>,
}

impl GetChannelSnapshotUseCase {
    pub fn new(
        channels: Arc<dyn ChannelRepository>,
        queues: Arc<dyn QueueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            channels,
            queues,
            clock,
        }
    }

    pub async fn execute(&self, channel_id: &ChannelId) -> Result<ChannelSnapshot, SnapshotError> {
        let channel = self
            .channels
            .find(channel_id)
            .await?
            .ok_or_else(|| SnapshotError::ChannelNotFound(channel_id.clone()))?;
        let queue = self
            .queues
            .load(channel_id)
            .await?
            .unwrap_or_else(|| Queue::empty(channel_id.clone()));

        Ok(ChannelSnapshot {
            channel,
            queue,
            taken_at: Timestamp::new(self.clock.now_millis()),
        })
    }
}

#[cfg(test)]
mod tests {
    use chorus_shared::time::FixedClock;

    use super::*;
    use crate::{
        domain::{
            ChannelName, ExternalSongId, MessageLog, MockQueueStore, SongId, UserId,
        },
        infrastructure::repository::{InMemoryChannelRepository, InMemoryQueueStore},
    };

    const NOW: i64 = 1_700_000_000_000;

    fn lobby() -> ChannelId {
        ChannelId::new("lobby".to_string()).unwrap()
    }

    fn song(start: i64) -> Song {
        Song {
            id: SongId::generate(),
            external_id: ExternalSongId::new("dQw4w9WgXcQ".to_string()).unwrap(),
            title: format!("song at {start}"),
            thumbnail_url: String::new(),
            duration_secs: 180.0,
            start_time: Timestamp::new(start),
        }
    }

    async fn channels_with_lobby() -> Arc<InMemoryChannelRepository> {
        let channels = Arc::new(InMemoryChannelRepository::new());
        channels
            .create(Channel::new(
                lobby(),
                ChannelName::new("Lobby".to_string()).unwrap(),
                UserId::new("alice".to_string()).unwrap(),
                String::new(),
                Timestamp::new(NOW - 1_000_000),
            ))
            .await
            .unwrap();
        channels
    }

    #[tokio::test]
    async fn test_snapshot_splits_last_played_and_upcoming() {
        // テスト項目: 現在時刻で直近の再生曲と今後の曲に分割される
        // given (前提条件):
        let channels = channels_with_lobby().await;
        let queues = Arc::new(InMemoryQueueStore::new());
        let mut queue = queues.create(&lobby()).await.unwrap();
        let past = song(NOW - 400_000);
        let playing = song(NOW - 100_000);
        let next = song(NOW + 80_000);
        let later = song(NOW + 260_000);
        queue.songs = vec![past, playing.clone(), next.clone(), later.clone()];
        queues.replace(&lobby(), queue).await.unwrap();
        let usecase =
            GetChannelSnapshotUseCase::new(channels, queues, Arc::new(FixedClock::new(NOW)));

        // when (操作):
        let snapshot = usecase.execute(&lobby()).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.taken_at, Timestamp::new(NOW));
        assert_eq!(snapshot.last_played(), Some(&playing));
        assert_eq!(snapshot.upcoming(), vec![&next, &later]);
    }

    #[tokio::test]
    async fn test_snapshot_song_starting_now_counts_as_played() {
        // テスト項目: 現在時刻ちょうどに始まる曲は再生済みとして扱われる
        // given (前提条件):
        let channels = channels_with_lobby().await;
        let queues = Arc::new(InMemoryQueueStore::new());
        let mut queue = queues.create(&lobby()).await.unwrap();
        let starting = song(NOW);
        queue.songs = vec![starting.clone()];
        queues.replace(&lobby(), queue).await.unwrap();
        let usecase =
            GetChannelSnapshotUseCase::new(channels, queues, Arc::new(FixedClock::new(NOW)));

        // when (操作):
        let snapshot = usecase.execute(&lobby()).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.last_played(), Some(&starting));
        assert!(snapshot.upcoming().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_without_queue_is_empty() {
        // テスト項目: キューが未作成のチャンネルは空のキューとして返る
        // given (前提条件):
        let channels = channels_with_lobby().await;
        let mut queues = MockQueueStore::new();
        queues.expect_load().returning(|_| Ok(None));
        let usecase = GetChannelSnapshotUseCase::new(
            channels,
            Arc::new(queues),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let snapshot = usecase.execute(&lobby()).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.queue, Queue::empty(lobby()));
        assert_eq!(snapshot.last_played(), None);
    }

    #[tokio::test]
    async fn test_snapshot_of_unknown_channel() {
        // テスト項目: 存在しないチャンネルは ChannelNotFound
        // given (前提条件):
        let usecase = GetChannelSnapshotUseCase::new(
            Arc::new(InMemoryChannelRepository::new()),
            Arc::new(InMemoryQueueStore::new()),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let result = usecase.execute(&lobby()).await;

        // then (期待する結果):
        assert_eq!(result, Err(SnapshotError::ChannelNotFound(lobby())));
    }

    #[tokio::test]
    async fn test_song_message_resolves_to_queue_entry() {
        // テスト項目: 履歴の曲メッセージからキュー内の曲を引ける
        // given (前提条件):
        let channels = channels_with_lobby().await;
        let queues = Arc::new(InMemoryQueueStore::new());
        let mut queue = queues.create(&lobby()).await.unwrap();
        let queued = song(NOW);
        queue.songs = vec![queued.clone()];
        queues.replace(&lobby(), queue).await.unwrap();
        let message = Message::song(UserId::new("bob".to_string()).unwrap(), queued.id);
        channels.append(&lobby(), message).await.unwrap();
        let usecase =
            GetChannelSnapshotUseCase::new(channels, queues, Arc::new(FixedClock::new(NOW)));

        // when (操作):
        let snapshot = usecase.execute(&lobby()).await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.channel.messages.len(), 1);
        assert_eq!(snapshot.song_for(&snapshot.channel.messages[0]), Some(&queued));
    }
}
