use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenIssuer;
use crate::database::models::NewUser;
use crate::database::{DatabaseError, Store};
use crate::error::{ApiError, CREDENTIALS_INCORRECT};

/// Body returned by signup and signin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
}

/// Signup and signin over the credential store.
///
/// Account state lives only in the store: no account for an email, an
/// account that exists, and a caller holding a token issued for it.
pub struct AuthService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { store, hasher, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Create an account for `email` and return a token for it
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let email = normalize_email(email);

        if self.store.find_user_by_email(&email).await?.is_some() {
            warn!("Signup rejected: email already registered");
            return Err(ApiError::conflict("Credentials taken"));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;

        // A concurrent signup for the same email loses on the unique index
        let user = match self
            .store
            .create_user(NewUser { email, password_hash })
            .await
        {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => return Err(ApiError::conflict("Credentials taken")),
            Err(e) => return Err(e.into()),
        };

        info!("User {} signed up", user.id);
        self.issue(user.id)
    }

    /// Exchange credentials for a token. Unknown email and wrong password
    /// fail identically.
    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let email = normalize_email(email);

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!("Signin failed: unknown email");
            return Err(ApiError::unauthorized(CREDENTIALS_INCORRECT));
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            warn!("Signin failed for user {}: wrong password", user.id);
            return Err(ApiError::unauthorized(CREDENTIALS_INCORRECT));
        }

        info!("User {} signed in", user.id);
        self.issue(user.id)
    }

    fn issue(&self, user_id: i64) -> Result<AuthToken, ApiError> {
        let access_token = self.tokens.issue(user_id)?;
        Ok(AuthToken { access_token })
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
