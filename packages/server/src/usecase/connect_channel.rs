//! UseCase: チャンネルへの接続・切断
//!
//! Registry への登録と登録解除だけを扱う。認証はセッションが接続後に行う。

use std::sync::Arc;

use crate::domain::{ChannelId, ConnectionRegistry, ConnectionToken, PusherChannel};

/// チャンネル接続のユースケース
pub struct ConnectChannelUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectChannelUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// コネクションをブロードキャスト対象に加え、トークンを返す
    pub async fn execute(&self, channel_id: &ChannelId, sender: PusherChannel) -> ConnectionToken {
        let token = self.registry.add(channel_id, sender).await;
        tracing::info!(
            "Connection {} joined channel '{}' ({} connected)",
            token,
            channel_id,
            self.registry.count(channel_id).await
        );
        token
    }
}

/// チャンネル切断のユースケース
pub struct DisconnectChannelUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectChannelUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 登録を解除する。既に解除済みでも何もしない
    pub async fn execute(&self, channel_id: &ChannelId, token: &ConnectionToken) {
        self.registry.remove(channel_id, token).await;
        tracing::info!(
            "Connection {} left channel '{}' ({} remaining)",
            token,
            channel_id,
            self.registry.count(channel_id).await
        );
    }
}
