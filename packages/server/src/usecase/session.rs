//! UseCase: 1 接続分のセッション
//!
//! フレームを 1 つずつ順番に処理する。状態遷移そのものは
//! [`SessionState`](crate::domain::SessionState) が決め、ここでは決まったアクションを
//! 各ユースケースに振り分ける。

use std::sync::Arc;

use crate::domain::{
    ChannelId, ConnectionToken, InboundFrame, Message, SessionAction, SessionEvent,
    SessionState, Song, UserId,
};

use super::{channel_sync::ChannelSync, error::SessionError};

/// 1 フレームを処理した結果
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Authenticated(UserId),
    TextPosted(Message),
    SongQueued(Song),
}

/// Registry に登録済みの 1 接続
///
/// [`ChannelSync::accept`] だけが作成する。
pub struct ConnectionSession {
    channel_id: ChannelId,
    token: ConnectionToken,
    state: SessionState,
    sync: Arc<ChannelSync>,
}

impl ConnectionSession {
    pub(super) fn new(channel_id: ChannelId, token: ConnectionToken, sync: Arc<ChannelSync>) -> Self {
        Self {
            channel_id,
            token,
            state: SessionState::Unauthenticated,
            sync,
        }
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    pub fn token(&self) -> ConnectionToken {
        self.token
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// フレームを分類し、現在の状態で許されるアクションを実行する
    pub async fn handle_frame(&mut self, raw: &str) -> Result<FrameOutcome, SessionError> {
        let frame = InboundFrame::classify(raw);
        match self.state.decide(frame) {
            SessionAction::VerifyCredential(token) => {
                match self.sync.authenticate.execute(&token).await {
                    Ok(user_id) => {
                        self.transition(SessionEvent::CredentialVerified(user_id.clone()));
                        Ok(FrameOutcome::Authenticated(user_id))
                    }
                    Err(e) => {
                        self.transition(SessionEvent::CredentialRejected);
                        Err(e)
                    }
                }
            }
            SessionAction::RejectUnauthorized => Err(SessionError::Unauthorized),
            SessionAction::RequestSong { author, song_id } => self
                .sync
                .request_song
                .execute(&self.channel_id, author, song_id)
                .await
                .map(FrameOutcome::SongQueued),
            SessionAction::PostText { author, content } => self
                .sync
                .post_text
                .execute(&self.channel_id, author, content)
                .await
                .map(FrameOutcome::TextPosted),
            SessionAction::Ignore => Err(SessionError::ConnectionClosed),
        }
    }

    /// フレームを処理し、失敗はこの接続にだけエラーフレームで通知する
    ///
    /// `Err` を返すのはセッションを終了すべき場合だけ。
    pub async fn process_frame(&mut self, raw: &str) -> Result<(), SessionError> {
        match self.handle_frame(raw).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Connection {} on '{}': {:?}",
                    self.token,
                    self.channel_id,
                    outcome
                );
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(
                    "Frame from connection {} on '{}' rejected: {}",
                    self.token,
                    self.channel_id,
                    e
                );
                self.sync
                    .acknowledge_error(&self.channel_id, &self.token, &e)
                    .await;
                Ok(())
            }
        }
    }

    /// `Closed` に遷移し、Registry から登録を解除する。2 回目以降は何もしない
    pub async fn close(&mut self) {
        if self.state.is_closed() {
            return;
        }
        self.transition(SessionEvent::TransportClosed);
        self.sync.disconnect.execute(&self.channel_id, &self.token).await;
    }

    fn transition(&mut self, event: SessionEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }
}
