//! UseCase: 曲メタデータの検索
//!
//! キューには触れず、リクエスト前のプレビュー用にメタデータだけを返す。

use std::sync::Arc;

use crate::domain::{ExternalSongId, SongMetadata, SongMetadataResolver};

use super::error::LookupSongError;

pub struct LookupSongUseCase {
    resolver: Arc<dyn SongMetadataResolver>,
}

impl LookupSongUseCase {
    pub fn new(resolver: Arc<dyn SongMetadataResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, song_id: String) -> Result<SongMetadata, LookupSongError> {
        let song_id = ExternalSongId::new(song_id)?;
        let metadata = self.resolver.resolve(&song_id).await?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MetadataError, MockSongMetadataResolver};

    #[tokio::test]
    async fn test_lookup_returns_metadata() {
        // テスト項目: 正しい ID ならリゾルバの結果をそのまま返す
        // given (前提条件):
        let mut resolver = MockSongMetadataResolver::new();
        resolver
            .expect_resolve()
            .withf(|song_id| song_id.as_str() == "dQw4w9WgXcQ")
            .times(1)
            .returning(|song_id| {
                Ok(SongMetadata {
                    external_id: song_id.clone(),
                    title: "Never Gonna Give You Up".to_string(),
                    thumbnail_url: "thumb".to_string(),
                    iso_duration: "PT3M33S".to_string(),
                })
            });
        let usecase = LookupSongUseCase::new(Arc::new(resolver));

        // when (操作):
        let metadata = usecase.execute("dQw4w9WgXcQ".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(metadata.title, "Never Gonna Give You Up");
        assert_eq!(metadata.iso_duration, "PT3M33S");
    }

    #[tokio::test]
    async fn test_lookup_rejects_malformed_id_without_calling_resolver() {
        // テスト項目: 形式の不正な ID はリゾルバを呼ばずに拒否される
        // given (前提条件):
        let mut resolver = MockSongMetadataResolver::new();
        resolver.expect_resolve().times(0);
        let usecase = LookupSongUseCase::new(Arc::new(resolver));

        // when (操作):
        let result = usecase.execute("not a video".to_string()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(LookupSongError::InvalidSongId(_))));
    }

    #[tokio::test]
    async fn test_lookup_propagates_resolver_failure() {
        // テスト項目: リゾルバの失敗は MetadataUnavailable になる
        // given (前提条件):
        let mut resolver = MockSongMetadataResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Err(MetadataError::NotConfigured));
        let usecase = LookupSongUseCase::new(Arc::new(resolver));

        // when (操作):
        let result = usecase.execute("dQw4w9WgXcQ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(LookupSongError::MetadataUnavailable(
                MetadataError::NotConfigured
            ))
        );
    }
}
