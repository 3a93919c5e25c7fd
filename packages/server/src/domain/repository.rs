//! Repository trait 定義
//!
//! ドメイン層が必要とする永続化のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{Channel, ChannelId, Message, Queue, RepositoryError};

/// Message Log Gateway
///
/// チャンネルのメッセージ履歴への追記のみを扱う。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// メッセージをチャンネルの履歴末尾に追加
    async fn append(&self, channel_id: &ChannelId, message: Message) -> Result<(), RepositoryError>;
}

/// チャンネルの作成・取得
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn create(&self, channel: Channel) -> Result<(), RepositoryError>;

    async fn find(&self, channel_id: &ChannelId) -> Result<Option<Channel>, RepositoryError>;
}

/// Queue Store Gateway
///
/// キューはドキュメント単位で置き換える。`replace` は条件付きで、
/// 保存済みの `version` が引数の `version` と一致しない場合は `Conflict` を返す。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// チャンネルのキューを取得（存在しなければ `None`）
    async fn load(&self, channel_id: &ChannelId) -> Result<Option<Queue>, RepositoryError>;

    /// 空のキューを作成して返す。既に存在する場合は保存済みのキューを返す
    async fn create(&self, channel_id: &ChannelId) -> Result<Queue, RepositoryError>;

    /// キュー全体を置き換え、新しい version のキューを返す
    async fn replace(&self, channel_id: &ChannelId, queue: Queue) -> Result<Queue, RepositoryError>;
}
