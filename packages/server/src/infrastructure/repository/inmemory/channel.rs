//! InMemory Channel Repository 実装
//!
//! ドメイン層が定義する `ChannelRepository` / `MessageLog` trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Channel, ChannelId, ChannelRepository, Message, MessageLog, RepositoryError};

/// インメモリ Channel Repository 実装
#[derive(Default)]
pub struct InMemoryChannelRepository {
    channels: Mutex<HashMap<ChannelId, Channel>>,
}

impl InMemoryChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn create(&self, channel: Channel) -> Result<(), RepositoryError> {
        let mut channels = self.channels.lock().await;
        if channels.contains_key(&channel.id) {
            return Err(RepositoryError::ChannelAlreadyExists(channel.id));
        }
        channels.insert(channel.id.clone(), channel);
        Ok(())
    }

    async fn find(&self, channel_id: &ChannelId) -> Result<Option<Channel>, RepositoryError> {
        let channels = self.channels.lock().await;
        Ok(channels.get(channel_id).cloned())
    }
}

#[async_trait]
impl MessageLog for InMemoryChannelRepository {
    async fn append(&self, channel_id: &ChannelId, message: Message) -> Result<(), RepositoryError> {
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| RepositoryError::ChannelNotFound(channel_id.clone()))?;
        channel.messages.push(message);
        Ok(())
    }
}
