//! HS512 JWT access-token verification.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::domain::{CredentialError, CredentialVerifier, UserId};

const REFRESH_TOKEN_MARKER: &str = "refresh";

/// Claims carried by access tokens issued by the account service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
    /// `"refresh"` on refresh tokens, absent on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub exp: u64,
}

pub struct JwtCredentialVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtCredentialVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl CredentialVerifier for JwtCredentialVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, CredentialError> {
        let claims = decode::<AccessClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::Expired,
                _ => CredentialError::Invalid(e.to_string()),
            })?;

        if claims.token.as_deref() == Some(REFRESH_TOKEN_MARKER) {
            return Err(CredentialError::RefreshToken);
        }
        UserId::new(claims.id).map_err(|_| CredentialError::MissingIdentity)
    }
}
