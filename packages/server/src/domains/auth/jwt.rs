use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// Lifetime of an issued session token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,      // Subject (user id as string)
    pub user_id: UserId,  // User UUID
    pub username: String, // Username (for logging and redirects)
    pub exp: i64,         // Expiration timestamp
    pub iat: i64,         // Issued at timestamp
    pub iss: String,      // Issuer
    pub jti: String,      // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a token for a logged-in user, valid for `TOKEN_TTL_HOURS`.
    pub fn create_token(&self, user_id: UserId, username: &str) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token; expired or foreign tokens are rejected.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
