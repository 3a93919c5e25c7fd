//! Domain layer: value objects, entities, pure algorithms, and the ports the
//! synchronization core depends on.

pub mod duration;
pub mod entity;
pub mod error;
pub mod frame;
pub mod gateway;
pub mod registry;
pub mod repository;
pub mod scheduler;
pub mod session;
pub mod value_object;

pub use entity::{
    Channel, Message, MessageBody, MessageKind, PendingSong, Queue, Song, SongMetadata,
};
pub use error::{
    BroadcastError, CredentialError, DurationParseError, MetadataError, RepositoryError,
    ValueObjectError,
};
pub use frame::InboundFrame;
pub use gateway::{CredentialVerifier, SongMetadataResolver};
pub use registry::{ConnectionRegistry, ConnectionToken, PusherChannel};
pub use repository::{ChannelRepository, MessageLog, QueueStore};
pub use scheduler::QueueScheduler;
pub use session::{SessionAction, SessionEvent, SessionState};
pub use value_object::{
    ChannelId, ChannelName, ExternalSongId, MessageContent, MessageId, SongId, Timestamp, UserId,
};

#[cfg(test)]
pub use gateway::{MockCredentialVerifier, MockSongMetadataResolver};
#[cfg(test)]
pub use registry::MockConnectionRegistry;
#[cfg(test)]
pub use repository::{MockChannelRepository, MockMessageLog, MockQueueStore};
