//! Connection session state machine.
//!
//! `Unauthenticated` → `Authenticated(identity)` → `Closed`. Transitions are pure:
//! [`SessionState::decide`] maps a frame to the action the session must perform,
//! and [`SessionState::apply`] folds the outcome of that action back into the state.

use super::{ExternalSongId, InboundFrame, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(UserId),
    Closed,
}

/// What the session has to do with one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    VerifyCredential(String),
    RejectUnauthorized,
    RequestSong {
        author: UserId,
        song_id: ExternalSongId,
    },
    PostText {
        author: UserId,
        content: String,
    },
    /// Frame arrived after close; drop it
    Ignore,
}

/// Outcomes that change the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    CredentialVerified(UserId),
    CredentialRejected,
    TransportClosed,
}

impl SessionState {
    pub fn identity(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated(user_id) => Some(user_id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Credential frames are evaluated first, so an authenticated session can
    /// re-authenticate as a different identity.
    pub fn decide(&self, frame: InboundFrame) -> SessionAction {
        match (self, frame) {
            (Self::Closed, _) => SessionAction::Ignore,
            (_, InboundFrame::Credential(token)) => SessionAction::VerifyCredential(token),
            (Self::Unauthenticated, _) => SessionAction::RejectUnauthorized,
            (Self::Authenticated(author), InboundFrame::SongRequest(song_id)) => {
                SessionAction::RequestSong {
                    author: author.clone(),
                    song_id,
                }
            }
            (Self::Authenticated(author), InboundFrame::Text(content)) => SessionAction::PostText {
                author: author.clone(),
                content,
            },
        }
    }

    pub fn apply(self, event: SessionEvent) -> Self {
        match (self, event) {
            (Self::Closed, _) | (_, SessionEvent::TransportClosed) => Self::Closed,
            (_, SessionEvent::CredentialVerified(user_id)) => Self::Authenticated(user_id),
            (state, SessionEvent::CredentialRejected) => state,
        }
    }
}
