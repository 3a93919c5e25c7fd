//! WebSocket を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - チャンネルごとに WebSocket の送信バッファ（`UnboundedSender`）を登録順に保持
//! - チャンネル単位のブロードキャストと、特定コネクションへの送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成と送信ループは UI 層（`ui/handler/websocket.rs`）が担当します。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージの送信に使用します。
//!
//! ブロードキャスト時はロック中にバケットのスナップショットだけを取り、送信はロック外で行う。
//! 送信自体は各コネクションのバッファに積むだけなので、遅いクライアントが他を止めることはない。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastError, ChannelId, ConnectionRegistry, ConnectionToken, PusherChannel};

struct Connection {
    token: ConnectionToken,
    sender: PusherChannel,
}

/// WebSocket を使った ConnectionRegistry 実装
///
/// ## 使用例
///
/// ```ignore
/// let registry = WebSocketConnectionRegistry::new();
/// let token = registry.add(&channel_id, tx).await;
///
/// registry.broadcast(&channel_id, "{\"type\":\"message\",\"content\":\"Hello\"}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketConnectionRegistry {
    /// Key: channel_id / Value: 登録順のコネクション
    buckets: Mutex<HashMap<ChannelId, Vec<Connection>>>,
}

impl WebSocketConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn snapshot(&self, channel_id: &ChannelId) -> Vec<(ConnectionToken, PusherChannel)> {
        let buckets = self.buckets.lock().await;
        buckets
            .get(channel_id)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|conn| (conn.token, conn.sender.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn add(&self, channel_id: &ChannelId, sender: PusherChannel) -> ConnectionToken {
        let token = ConnectionToken::generate();
        let mut buckets = self.buckets.lock().await;
        buckets
            .entry(channel_id.clone())
            .or_default()
            .push(Connection { token, sender });
        tracing::debug!("Connection {} registered on channel '{}'", token, channel_id);
        token
    }

    async fn remove(&self, channel_id: &ChannelId, token: &ConnectionToken) {
        let mut buckets = self.buckets.lock().await;
        let Some(bucket) = buckets.get_mut(channel_id) else {
            return;
        };
        let before = bucket.len();
        bucket.retain(|conn| &conn.token != token);
        if bucket.len() != before {
            tracing::debug!("Connection {} removed from channel '{}'", token, channel_id);
        }
        if bucket.is_empty() {
            buckets.remove(channel_id);
        }
    }

    async fn broadcast(
        &self,
        channel_id: &ChannelId,
        payload: &str,
    ) -> Result<usize, BroadcastError> {
        let targets = self.snapshot(channel_id).await;

        let mut failed = Vec::new();
        for (token, sender) in &targets {
            // 一部の送信失敗は許容し、残りのコネクションへの送信を続ける
            if let Err(e) = sender.send(payload.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection {} on channel '{}': {}",
                    token,
                    channel_id,
                    e
                );
                failed.push(*token);
            }
        }

        if failed.is_empty() {
            tracing::debug!(
                "Broadcasted message to {} connection(s) on channel '{}'",
                targets.len(),
                channel_id
            );
            Ok(targets.len())
        } else {
            Err(BroadcastError {
                channel_id: channel_id.clone(),
                attempted: targets.len(),
                failed,
            })
        }
    }

    async fn push_to(
        &self,
        channel_id: &ChannelId,
        token: &ConnectionToken,
        payload: &str,
    ) -> Result<(), BroadcastError> {
        let sender = self
            .snapshot(channel_id)
            .await
            .into_iter()
            .find(|(candidate, _)| candidate == token)
            .map(|(_, sender)| sender);

        let delivered = sender.is_some_and(|sender| sender.send(payload.to_string()).is_ok());
        if delivered {
            Ok(())
        } else {
            Err(BroadcastError {
                channel_id: channel_id.clone(),
                attempted: 1,
                failed: vec![*token],
            })
        }
    }

    async fn count(&self, channel_id: &ChannelId) -> usize {
        let buckets = self.buckets.lock().await;
        buckets.get(channel_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - add / remove / broadcast / push_to の基本動作
    // - 未登録コネクションの remove が他に影響しないこと
    // - 一部コネクションの送信失敗が残りへの送信を妨げないこと
    //
    // 【なぜこのテストが必要か】
    // - Registry はセッション間の唯一の共有構造で、ブロードキャストの中核
    // ========================================

    fn channel(id: &str) -> ChannelId {
        ChannelId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_broadcast_delivers_in_registration_order() {
        // テスト項目: 登録済みの全コネクションにメッセージが届く
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let lobby = channel("lobby");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.add(&lobby, tx1).await;
        registry.add(&lobby, tx2).await;

        // when (操作):
        let result = registry.broadcast(&lobby, "hello").await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        assert_eq!(rx1.recv().await, Some("hello".to_string()));
        assert_eq!(rx2.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_is_scoped_to_channel() {
        // テスト項目: 別チャンネルのコネクションには届かない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.add(&channel("a"), tx_a).await;
        registry.add(&channel("b"), tx_b).await;

        // when (操作):
        registry.broadcast(&channel("a"), "only a").await.unwrap();

        // then (期待する結果):
        assert_eq!(rx_a.recv().await, Some("only a".to_string()));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reports_exactly_the_failed_connection() {
        // テスト項目: 1 つのコネクションが死んでいても全員に送信を試み、失敗はその 1 件だけ報告される
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let lobby = channel("lobby");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        registry.add(&lobby, tx1).await;
        let dead = registry.add(&lobby, tx2).await;
        registry.add(&lobby, tx3).await;
        drop(rx2);

        // when (操作):
        let result = registry.broadcast(&lobby, "hello").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(BroadcastError {
                channel_id: lobby.clone(),
                attempted: 3,
                failed: vec![dead],
            })
        );
        assert_eq!(rx1.recv().await, Some("hello".to_string()));
        assert_eq!(rx3.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_channel() {
        // テスト項目: 誰もいないチャンネルへのブロードキャストはエラーにならない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();

        // when (操作):
        let result = registry.broadcast(&channel("empty"), "Message").await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
    }

    #[tokio::test]
    async fn test_remove_unknown_connection_is_noop() {
        // テスト項目: 登録されていないトークンの remove は何も変更しない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let lobby = channel("lobby");
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.add(&lobby, tx).await;

        // when (操作):
        registry.remove(&lobby, &ConnectionToken::generate()).await;
        registry
            .remove(&channel("elsewhere"), &ConnectionToken::generate())
            .await;

        // then (期待する結果):
        assert_eq!(registry.count(&lobby).await, 1);
    }

    #[tokio::test]
    async fn test_remove_stops_delivery() {
        // テスト項目: remove したコネクションには以後届かない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let lobby = channel("lobby");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let first = registry.add(&lobby, tx1).await;
        registry.add(&lobby, tx2).await;

        // when (操作):
        registry.remove(&lobby, &first).await;
        let result = registry.broadcast(&lobby, "after").await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert_eq!(rx2.recv().await, Some("after".to_string()));
        assert!(rx1.try_recv().is_err());
        assert_eq!(registry.count(&lobby).await, 1);
    }

    #[tokio::test]
    async fn test_push_to_single_connection() {
        // テスト項目: push_to は指定したコネクションにだけ届く
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let lobby = channel("lobby");
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let target = registry.add(&lobby, tx1).await;
        registry.add(&lobby, tx2).await;

        // when (操作):
        let result = registry.push_to(&lobby, &target, "just you").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("just you".to_string()));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // テスト項目: 存在しないコネクションへの push_to はエラーになる
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();

        // when (操作):
        let result = registry
            .push_to(&channel("lobby"), &ConnectionToken::generate(), "x")
            .await;

        // then (期待する結果):
        assert!(result.is_err());
    }
}
