//! UseCase layer: application flows on top of the domain ports.

pub mod authenticate;
pub mod channel_sync;
pub mod connect_channel;
pub mod create_channel;
pub mod error;
pub mod get_channel_snapshot;
pub mod lookup_song;
pub mod post_text_message;
pub mod request_song;
pub mod session;

pub use authenticate::AuthenticateUseCase;
pub use channel_sync::ChannelSync;
pub use connect_channel::{ConnectChannelUseCase, DisconnectChannelUseCase};
pub use create_channel::CreateChannelUseCase;
pub use error::{CreateChannelError, LookupSongError, SessionError, SnapshotError};
pub use get_channel_snapshot::{ChannelSnapshot, GetChannelSnapshotUseCase};
pub use lookup_song::LookupSongUseCase;
pub use post_text_message::PostTextMessageUseCase;
pub use request_song::{MAX_SCHEDULE_ATTEMPTS, RequestSongUseCase};
pub use session::{ConnectionSession, FrameOutcome};

use crate::domain::{ChannelId, ConnectionRegistry};

/// Fan out to the channel; per-connection failures are logged, not returned.
///
/// Returns the number of connections the payload reached.
async fn broadcast_best_effort(
    registry: &dyn ConnectionRegistry,
    channel_id: &ChannelId,
    payload: &str,
) -> usize {
    match registry.broadcast(channel_id, payload).await {
        Ok(delivered) => delivered,
        Err(e) => {
            tracing::warn!("{}: {:?}", e, e.failed);
            e.attempted.saturating_sub(e.failed.len())
        }
    }
}
