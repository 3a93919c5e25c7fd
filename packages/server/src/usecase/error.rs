//! UseCase layer errors.

use thiserror::Error;

use crate::domain::{
    ChannelId, CredentialError, DurationParseError, MetadataError, RepositoryError,
    ValueObjectError,
};

/// Failure while processing one inbound frame of a connection session.
///
/// Every kind except `ConnectionClosed` is recovered locally: it is logged,
/// acknowledged to the originating connection only, and the session keeps reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unauthorized: send a bearer credential first")]
    Unauthorized,

    #[error("credential rejected: {0}")]
    MalformedCredential(#[from] CredentialError),

    #[error("song metadata unavailable: {0}")]
    MetadataUnavailable(#[from] MetadataError),

    #[error(transparent)]
    InvalidDuration(#[from] DurationParseError),

    #[error("invalid message: {0}")]
    InvalidContent(#[from] ValueObjectError),

    #[error("persistence failure: {0}")]
    PersistenceFailure(RepositoryError),

    #[error("queue changed concurrently {attempts} time(s), song not queued")]
    Conflict { attempts: usize },

    #[error("failed to encode outbound frame: {0}")]
    Encoding(String),

    #[error("connection closed")]
    ConnectionClosed,
}

impl SessionError {
    /// Machine-readable code used in error-acknowledgement frames.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::MalformedCredential(_) => "malformed_credential",
            Self::MetadataUnavailable(_) => "metadata_unavailable",
            Self::InvalidDuration(_) => "invalid_duration",
            Self::InvalidContent(_) => "invalid_content",
            Self::PersistenceFailure(_) => "persistence_failure",
            Self::Conflict { .. } => "conflict",
            Self::Encoding(_) => "encoding",
            Self::ConnectionClosed => "connection_closed",
        }
    }

    /// Only a closed connection ends the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

/// Channel snapshot query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(ChannelId),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Channel creation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateChannelError {
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] CredentialError),

    #[error("invalid channel: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Song metadata lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupSongError {
    #[error("invalid song id: {0}")]
    InvalidSongId(#[from] ValueObjectError),

    #[error("song metadata unavailable: {0}")]
    MetadataUnavailable(#[from] MetadataError),
}
