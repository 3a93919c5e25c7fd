//! Domain layer errors.

use thiserror::Error;

use super::{ChannelId, ConnectionToken};

/// Value Object の生成失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} is too long (max {max}, got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} has an invalid format: '{value}'")]
    InvalidFormat { field: &'static str, value: String },
}

/// ISO-8601 duration string without any recognizable component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ISO 8601 duration: '{0}'")]
pub struct DurationParseError(pub String);

/// 永続化層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(ChannelId),

    #[error("channel '{0}' already exists")]
    ChannelAlreadyExists(ChannelId),

    /// Conditional replace saw a different version than the caller loaded.
    #[error("queue for channel '{channel_id}' changed concurrently (expected version {expected}, found {actual})")]
    Conflict {
        channel_id: ChannelId,
        expected: u64,
        actual: u64,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Fan-out where at least one registered connection could not be written to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to deliver to {} of {attempted} connection(s) on channel '{channel_id}'", failed.len())]
pub struct BroadcastError {
    pub channel_id: ChannelId,
    pub attempted: usize,
    pub failed: Vec<ConnectionToken>,
}

/// クレデンシャル検証の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("refresh token presented where an access token is required")]
    RefreshToken,

    #[error("token carries no identity")]
    MissingIdentity,
}

/// 曲メタデータ取得の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("no metadata provider configured")]
    NotConfigured,

    #[error("song '{0}' not found")]
    NotFound(String),

    #[error("metadata request failed: {0}")]
    Request(String),
}
