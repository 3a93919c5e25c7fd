//! YouTube Data API v3 song metadata resolver.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::{ExternalSongId, MetadataError, SongMetadata, SongMetadataResolver};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// `GET /videos?part=snippet,contentDetails` response (only the fields we read).
#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    content_details: ContentDetails,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl VideoListResponse {
    fn into_metadata(self, requested: &ExternalSongId) -> Result<SongMetadata, MetadataError> {
        let item = self
            .items
            .into_iter()
            .next()
            .ok_or_else(|| MetadataError::NotFound(requested.to_string()))?;

        let external_id = ExternalSongId::new(item.id).map_err(|e| {
            MetadataError::Request(format!("provider returned an unusable id: {e}"))
        })?;
        Ok(SongMetadata {
            external_id,
            title: item.snippet.title,
            thumbnail_url: item
                .snippet
                .thumbnails
                .default
                .map(|thumb| thumb.url)
                .unwrap_or_default(),
            iso_duration: item.content_details.duration,
        })
    }
}

/// Resolves song metadata through the YouTube Data API.
///
/// Without an API key every lookup fails with `MetadataError::NotConfigured`.
#[derive(Debug, Clone)]
pub struct YouTubeMetadataResolver {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeMetadataResolver {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: Option<String>,
        timeout: Duration,
        base_url: String,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SongMetadataResolver for YouTubeMetadataResolver {
    async fn resolve(&self, song_id: &ExternalSongId) -> Result<SongMetadata, MetadataError> {
        let api_key = self.api_key.as_deref().ok_or(MetadataError::NotConfigured)?;

        let url = format!("{}/videos", self.base_url);
        tracing::debug!("Resolving metadata for song '{}'", song_id);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("id", song_id.as_str()),
                ("key", api_key),
                ("part", "snippet,contentDetails"),
            ])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| MetadataError::Request(e.without_url().to_string()))?;

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| MetadataError::Request(e.to_string()))?;
        body.into_metadata(song_id)
    }
}
