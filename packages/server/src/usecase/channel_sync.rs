//! Channel synchronization facade.
//!
//! The two entry points the outer layer calls: accept a connection for a channel,
//! and resolve a channel snapshot for non-realtime reads.

use std::sync::Arc;

use chorus_shared::time::Clock;

use crate::{
    domain::{
        ChannelId, ChannelRepository, ConnectionRegistry, ConnectionToken, CredentialVerifier,
        MessageLog, PusherChannel, QueueScheduler, QueueStore, SongMetadataResolver,
    },
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{
    AuthenticateUseCase, ConnectChannelUseCase, DisconnectChannelUseCase, PostTextMessageUseCase,
    RequestSongUseCase,
    error::{SessionError, SnapshotError},
    get_channel_snapshot::{ChannelSnapshot, GetChannelSnapshotUseCase},
    session::ConnectionSession,
};

pub struct ChannelSync {
    pub(super) connect: ConnectChannelUseCase,
    pub(super) disconnect: DisconnectChannelUseCase,
    pub(super) authenticate: AuthenticateUseCase,
    pub(super) post_text: PostTextMessageUseCase,
    pub(super) request_song: RequestSongUseCase,
    get_snapshot: GetChannelSnapshotUseCase,
    registry: Arc<dyn ConnectionRegistry>,
}

impl ChannelSync {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_log: Arc<dyn MessageLog>,
        queue_store: Arc<dyn QueueStore>,
        verifier: Arc<dyn CredentialVerifier>,
        resolver: Arc<dyn SongMetadataResolver>,
        channels: Arc<dyn ChannelRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect: ConnectChannelUseCase::new(registry.clone()),
            disconnect: DisconnectChannelUseCase::new(registry.clone()),
            authenticate: AuthenticateUseCase::new(verifier),
            post_text: PostTextMessageUseCase::new(message_log.clone(), registry.clone()),
            request_song: RequestSongUseCase::new(
                channels.clone(),
                resolver,
                queue_store.clone(),
                message_log,
                registry.clone(),
                QueueScheduler::new(clock.clone()),
            ),
            get_snapshot: GetChannelSnapshotUseCase::new(channels, queue_store, clock),
            registry,
        }
    }

    /// Register `sender` on the channel and start an unauthenticated session for it.
    ///
    /// The channel is not required to exist yet; frames that need it fail per frame.
    pub async fn accept(
        self: &Arc<Self>,
        channel_id: ChannelId,
        sender: PusherChannel,
    ) -> ConnectionSession {
        let token = self.connect.execute(&channel_id, sender).await;
        ConnectionSession::new(channel_id, token, Arc::clone(self))
    }

    /// History, the song currently playing and the songs still to come.
    pub async fn snapshot(
        &self,
        channel_id: &ChannelId,
    ) -> Result<ChannelSnapshot, SnapshotError> {
        self.get_snapshot.execute(channel_id).await
    }

    /// Error acknowledgement, delivered to the failing connection only.
    pub(super) async fn acknowledge_error(
        &self,
        channel_id: &ChannelId,
        token: &ConnectionToken,
        error: &SessionError,
    ) {
        let payload = match OutboundFrame::error(error.code(), error.to_string()).to_json() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to encode error frame: {}", e);
                return;
            }
        };
        if let Err(e) = self.registry.push_to(channel_id, token, &payload).await {
            tracing::debug!("Error frame not delivered to {}: {}", token, e);
        }
    }
}
