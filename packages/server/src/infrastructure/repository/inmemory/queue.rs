//! InMemory Queue Store 実装
//!
//! キューはチャンネル ID ごとに 1 ドキュメント。`replace` は version による
//! 条件付き置換で、読み込み後に他のセッションが書き込んでいれば `Conflict` を返す。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelId, Queue, QueueStore, RepositoryError};

/// インメモリ Queue Store 実装
#[derive(Default)]
pub struct InMemoryQueueStore {
    queues: Mutex<HashMap<ChannelId, Queue>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn load(&self, channel_id: &ChannelId) -> Result<Option<Queue>, RepositoryError> {
        let queues = self.queues.lock().await;
        Ok(queues.get(channel_id).cloned())
    }

    async fn create(&self, channel_id: &ChannelId) -> Result<Queue, RepositoryError> {
        let mut queues = self.queues.lock().await;
        let queue = queues
            .entry(channel_id.clone())
            .or_insert_with(|| Queue::empty(channel_id.clone()));
        Ok(queue.clone())
    }

    async fn replace(
        &self,
        channel_id: &ChannelId,
        mut queue: Queue,
    ) -> Result<Queue, RepositoryError> {
        let mut queues = self.queues.lock().await;
        let current = queues.get(channel_id).map_or(0, |stored| stored.version);
        if current != queue.version {
            return Err(RepositoryError::Conflict {
                channel_id: channel_id.clone(),
                expected: queue.version,
                actual: current,
            });
        }

        queue.channel_id = channel_id.clone();
        queue.version = current + 1;
        queues.insert(channel_id.clone(), queue.clone());
        Ok(queue)
    }
}
