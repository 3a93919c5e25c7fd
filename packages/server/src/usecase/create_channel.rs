//! UseCase: チャンネルの作成

use std::sync::Arc;

use chorus_shared::time::Clock;

use crate::domain::{
    Channel, ChannelId, ChannelName, ChannelRepository, CredentialVerifier, Timestamp,
};

use super::error::CreateChannelError;

/// チャンネル作成のユースケース
///
/// 作成者はクレデンシャルから得た ID で、チャンネルのオーナーになる。
pub struct CreateChannelUseCase {
    verifier: Arc<dyn CredentialVerifier>,
    channels: Arc<dyn ChannelRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateChannelUseCase {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        channels: Arc<dyn ChannelRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verifier,
            channels,
            clock,
        }
    }

    pub async fn execute(
        &self,
        token: &str,
        name: String,
        description: String,
    ) -> Result<Channel, CreateChannelError> {
        let owner = self.verifier.verify(token).await?;
        let name = ChannelName::new(name)?;

        let channel = Channel::new(
            ChannelId::generate(),
            name,
            owner,
            description,
            Timestamp::new(self.clock.now_millis()),
        );
        self.channels.create(channel.clone()).await?;

        tracing::info!(
            "Channel '{}' ({}) created by '{}'",
            channel.name.as_str(),
            channel.id,
            channel.owner
        );
        Ok(channel)
    }
}
