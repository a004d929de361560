use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::guard::{authorize_resource, Access};
use crate::database::models::{User, UserChanges};
use crate::database::Store;
use crate::error::ApiError;

pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Profile of the authenticated caller
    pub async fn me(&self, caller_id: i64) -> Result<User, ApiError> {
        self.load_owned(caller_id, caller_id).await
    }

    pub async fn edit(&self, caller_id: i64, changes: UserChanges) -> Result<User, ApiError> {
        let current = self.load_owned(caller_id, caller_id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        let user = self.store.update_user(caller_id, changes).await?;
        info!("User {} updated profile", caller_id);
        Ok(user)
    }

    async fn load_owned(&self, caller_id: i64, user_id: i64) -> Result<User, ApiError> {
        let Some(user) = self.store.find_user_by_id(user_id).await? else {
            // Token outlived its account
            warn!("Token subject {} has no account", caller_id);
            return Err(ApiError::not_found("User not found"));
        };

        match authorize_resource(caller_id, &user) {
            Access::Allowed => Ok(user),
            Access::Denied => Err(ApiError::access_denied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::MemoryStore;

    async fn setup() -> (UserService, i64) {
        let store = Arc::new(MemoryStore::new());
        let user = store
            .create_user(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (UserService::new(store), user.id)
    }

    #[tokio::test]
    async fn edit_changes_only_given_fields() {
        let (service, id) = setup().await;

        let first = UserChanges {
            first_name: Some("Hermit".to_string()),
            ..Default::default()
        };
        service.edit(id, first).await.unwrap();

        let last = UserChanges {
            last_name: Some("Crab".to_string()),
            ..Default::default()
        };
        let user = service.edit(id, last).await.unwrap();

        assert_eq!(user.first_name.as_deref(), Some("Hermit"));
        assert_eq!(user.last_name.as_deref(), Some("Crab"));
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn unknown_subject_is_not_found() {
        let (service, _id) = setup().await;
        assert_eq!(service.me(404).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn me_returns_own_profile() {
        let (service, id) = setup().await;
        assert_eq!(service.me(id).await.unwrap().id, id);
    }
}
