//! Entity 定義
//!
//! - `Channel`: メッセージ履歴を持つリスニングルーム
//! - `Message`: チャンネルに追記される不変のイベント（テキスト or 曲）
//! - `Queue`: チャンネルごとに 1 つ、再生開始時刻つきの曲リスト
//! - `Song`: キューに積まれたスケジュール済みの曲

use std::time::Duration;

use super::{
    ChannelId, ChannelName, DurationParseError, ExternalSongId, MessageContent, MessageId,
    SongId, Timestamp, UserId, duration::parse_iso_duration,
};

/// チャンネル
///
/// `messages` は追記のみ。挿入順 = 時系列 = 表示順。
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: ChannelName,
    pub owner: UserId,
    pub description: String,
    pub messages: Vec<Message>,
    pub created_at: Timestamp,
}

impl Channel {
    pub fn new(
        id: ChannelId,
        name: ChannelName,
        owner: UserId,
        description: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            description,
            messages: Vec::new(),
            created_at,
        }
    }
}

/// Message type on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Song,
}

/// メッセージ本文。曲メッセージは本文を持たず、キュー内の曲を参照する
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(MessageContent),
    Song(SongId),
}

/// チャンネルメッセージ（作成後は不変）
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub author: UserId,
    pub body: MessageBody,
}

impl Message {
    pub fn text(author: UserId, content: MessageContent) -> Self {
        Self {
            id: MessageId::generate(),
            author,
            body: MessageBody::Text(content),
        }
    }

    pub fn song(author: UserId, song_id: SongId) -> Self {
        Self {
            id: MessageId::generate(),
            author,
            body: MessageBody::Song(song_id),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self.body {
            MessageBody::Text(_) => MessageKind::Text,
            MessageBody::Song(_) => MessageKind::Song,
        }
    }
}

/// Metadata returned by the song metadata collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMetadata {
    pub external_id: ExternalSongId,
    pub title: String,
    pub thumbnail_url: String,
    /// ISO-8601 duration, e.g. `PT3M15S`
    pub iso_duration: String,
}

/// A song that has an identity and a duration but no start time yet.
///
/// Only the scheduler turns it into a [`Song`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSong {
    pub id: SongId,
    pub external_id: ExternalSongId,
    pub title: String,
    pub thumbnail_url: String,
    pub duration: Duration,
}

impl PendingSong {
    /// メタデータから新しい ID を持つ曲を組み立てる
    pub fn from_metadata(metadata: SongMetadata) -> Result<Self, DurationParseError> {
        let duration = parse_iso_duration(&metadata.iso_duration)?;
        Ok(Self {
            id: SongId::generate(),
            external_id: metadata.external_id,
            title: metadata.title,
            thumbnail_url: metadata.thumbnail_url,
            duration,
        })
    }

    pub(crate) fn scheduled_at(self, start_time: Timestamp) -> Song {
        Song {
            id: self.id,
            external_id: self.external_id,
            title: self.title,
            thumbnail_url: self.thumbnail_url,
            duration_secs: self.duration.as_secs_f64(),
            start_time,
        }
    }
}

/// キュー内のスケジュール済みの曲
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: SongId,
    pub external_id: ExternalSongId,
    pub title: String,
    pub thumbnail_url: String,
    pub duration_secs: f64,
    pub start_time: Timestamp,
}

impl Song {
    pub fn end_time(&self) -> Timestamp {
        self.start_time.plus_seconds(self.duration_secs)
    }
}

/// チャンネルの再生キュー
///
/// `songs` は `start_time` の非減少順。`version` は条件付き置換（楽観的並行制御）に使う。
#[derive(Debug, Clone, PartialEq)]
pub struct Queue {
    pub channel_id: ChannelId,
    pub songs: Vec<Song>,
    pub version: u64,
}

impl Queue {
    pub fn empty(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            songs: Vec::new(),
            version: 0,
        }
    }

    pub fn last_song(&self) -> Option<&Song> {
        self.songs.last()
    }

    /// 最後に再生が始まった曲（`start_time <= now` の中で最新）
    pub fn last_played(&self, now: Timestamp) -> Option<&Song> {
        self.songs
            .iter()
            .filter(|song| song.start_time <= now)
            .max_by_key(|song| song.start_time)
    }

    /// これから再生される曲（`start_time > now`）を開始時刻順に返す
    pub fn upcoming(&self, now: Timestamp) -> Vec<&Song> {
        let mut songs: Vec<&Song> = self
            .songs
            .iter()
            .filter(|song| song.start_time > now)
            .collect();
        songs.sort_by_key(|song| song.start_time);
        songs
    }

    pub fn find_song(&self, song_id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|song| &song.id == song_id)
    }
}
