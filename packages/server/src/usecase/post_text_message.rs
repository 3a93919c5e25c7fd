//! UseCase: テキストメッセージの投稿
//!
//! 履歴への追記が成功した後にだけブロードキャストする。追記に失敗した
//! メッセージは誰にも届かない。

use std::sync::Arc;

use crate::{
    domain::{ChannelId, ConnectionRegistry, Message, MessageContent, MessageLog, UserId},
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{broadcast_best_effort, error::SessionError};

/// テキスト投稿のユースケース
pub struct PostTextMessageUseCase {
    message_log: Arc<dyn MessageLog>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl PostTextMessageUseCase {
    pub fn new(message_log: Arc<dyn MessageLog>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            message_log,
            registry,
        }
    }

    /// メッセージを履歴に追加し、チャンネル全体に配信する
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ
    /// * `Err(SessionError::InvalidContent)` - 空、または長すぎる本文
    /// * `Err(SessionError::PersistenceFailure)` - 追記に失敗（配信もしない）
    pub async fn execute(
        &self,
        channel_id: &ChannelId,
        author: UserId,
        raw_content: String,
    ) -> Result<Message, SessionError> {
        let content = MessageContent::new(raw_content)?;
        let message = Message::text(author, content.clone());

        self.message_log
            .append(channel_id, message.clone())
            .await
            .map_err(SessionError::PersistenceFailure)?;

        let payload = OutboundFrame::chat(&message, &content).to_json()?;
        broadcast_best_effort(self.registry.as_ref(), channel_id, &payload).await;

        Ok(message)
    }
}
