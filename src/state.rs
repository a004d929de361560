use std::sync::Arc;

use crate::auth::{AuthError, AuthService, PasswordHasher, TokenIssuer};
use crate::config::AppConfig;
use crate::database::Store;
use crate::services::{BookmarkService, UserService};

/// Everything a request handler needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub bookmarks: Arc<BookmarkService>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::from_config(&config.security)?;
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);

        Ok(Self {
            auth: Arc::new(AuthService::new(store.clone(), hasher, tokens)),
            users: Arc::new(UserService::new(store.clone())),
            bookmarks: Arc::new(BookmarkService::new(store.clone())),
            config: Arc::new(config),
            store,
        })
    }

    pub fn tokens(&self) -> &TokenIssuer {
        self.auth.tokens()
    }
}
