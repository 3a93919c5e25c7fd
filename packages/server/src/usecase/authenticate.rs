//! UseCase: クレデンシャルフレームの検証

use std::sync::Arc;

use crate::domain::{CredentialVerifier, UserId};

use super::error::SessionError;

/// クレデンシャル検証のユースケース
pub struct AuthenticateUseCase {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthenticateUseCase {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    /// トークンを検証し、認証されたユーザー ID を返す
    ///
    /// 永続化もブロードキャストも行わない。
    pub async fn execute(&self, token: &str) -> Result<UserId, SessionError> {
        let user_id = self.verifier.verify(token).await?;
        Ok(user_id)
    }
}
