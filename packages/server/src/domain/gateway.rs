//! Black-box collaborators consumed by the synchronization core.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{CredentialError, ExternalSongId, MetadataError, SongMetadata, UserId};

/// Credential Verification: `token -> identity`
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserId, CredentialError>;
}

/// Song Metadata Resolution: `external song id -> title / thumbnail / duration`
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SongMetadataResolver: Send + Sync {
    async fn resolve(&self, song_id: &ExternalSongId) -> Result<SongMetadata, MetadataError>;
}
