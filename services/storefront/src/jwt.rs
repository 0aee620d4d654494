//! JWT service for identity token issuance and verification
//!
//! Tokens are HS256-signed, carry only the user id, and are not stored
//! anywhere server side. Expiry is checked at verification time with no
//! leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    pub expiry_seconds: u64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_seconds: u64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry_seconds: config.expiry_seconds,
        }
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user_id: Uuid) -> ApiResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> ApiResult<String> {
        let iat = issued_at.timestamp();
        let lifetime = i64::try_from(self.expiry_seconds)
            .map_err(|_| anyhow::anyhow!("Token lifetime out of range"))?;

        let claims = Claims {
            sub: user_id,
            iat,
            exp: iat.saturating_add(lifetime),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;
        Ok(token)
    }

    /// Validate a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> ApiResult<Uuid> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                ApiError::InvalidToken
            })?;
        Ok(token_data.claims.sub)
    }
}
