use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => AuthError::Malformed,
            _ => AuthError::InvalidToken,
        }
    }
}

/// Claims carried by every bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, decimal string per RFC 7519
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens with a fixed lifetime
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, AuthError> {
        let hours = security.jwt_expiry_hours;
        let expiry = i64::try_from(hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or(AuthError::InvalidExpiry(hours))?;
        Self::new(&security.jwt_secret, expiry)
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| AuthError::TokenGeneration("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        self.encode_claims(&claims)
    }

    /// Signature and expiry check; returns the user id the token was issued for
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AuthError::from(e)
        })?;
        data.claims.sub.parse::<i64>().map_err(|_| AuthError::Malformed)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }
}
