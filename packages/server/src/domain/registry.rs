//! Connection Registry trait 定義
//!
//! チャンネル ID → 接続中のコネクション集合。UseCase 層はこの trait 経由で
//! ブロードキャストし、WebSocket の具体的な実装には依存しない。

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{BroadcastError, ChannelId};

/// Outbound buffer of one connection; a writer task drains it into the socket.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Stable per-connection handle issued by [`ConnectionRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionToken(Uuid);

impl ConnectionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// コネクションをチャンネルに登録し、トークンを発行する
    async fn add(&self, channel_id: &ChannelId, sender: PusherChannel) -> ConnectionToken;

    /// トークンに対応するコネクションを削除する（未登録なら何もしない）
    async fn remove(&self, channel_id: &ChannelId, token: &ConnectionToken);

    /// チャンネルの全コネクションに登録順で送信し、届いた件数を返す
    ///
    /// 一部の送信失敗は残りへの送信を妨げず、まとめて `BroadcastError` で報告する。
    async fn broadcast(&self, channel_id: &ChannelId, payload: &str)
    -> Result<usize, BroadcastError>;

    /// 特定のコネクションにだけ送信する
    async fn push_to(
        &self,
        channel_id: &ChannelId,
        token: &ConnectionToken,
        payload: &str,
    ) -> Result<(), BroadcastError>;

    /// チャンネルに登録中のコネクション数
    async fn count(&self, channel_id: &ChannelId) -> usize;
}
