use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::guard::{authorize_resource, Access};
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark};
use crate::database::Store;
use crate::error::ApiError;

/// Per-user bookmark CRUD. Every id-addressed call loads the bookmark by id,
/// runs the ownership guard, and only then touches the store.
pub struct BookmarkService {
    store: Arc<dyn Store>,
}

impl BookmarkService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, caller_id: i64) -> Result<Vec<Bookmark>, ApiError> {
        Ok(self.store.list_bookmarks(caller_id).await?)
    }

    pub async fn create(
        &self,
        caller_id: i64,
        title: String,
        link: String,
        description: Option<String>,
    ) -> Result<Bookmark, ApiError> {
        if self.store.find_user_by_id(caller_id).await?.is_none() {
            // Token outlived its account
            warn!("Token subject {} has no account", caller_id);
            return Err(ApiError::not_found("User not found"));
        }

        let bookmark = self
            .store
            .create_bookmark(NewBookmark {
                user_id: caller_id,
                title,
                link,
                description,
            })
            .await?;
        info!("User {} created bookmark {}", caller_id, bookmark.id);
        Ok(bookmark)
    }

    pub async fn get(&self, caller_id: i64, bookmark_id: i64) -> Result<Bookmark, ApiError> {
        self.load_owned(caller_id, bookmark_id).await
    }

    pub async fn edit(
        &self,
        caller_id: i64,
        bookmark_id: i64,
        changes: BookmarkChanges,
    ) -> Result<Bookmark, ApiError> {
        let current = self.load_owned(caller_id, bookmark_id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        Ok(self.store.update_bookmark(bookmark_id, changes).await?)
    }

    pub async fn delete(&self, caller_id: i64, bookmark_id: i64) -> Result<(), ApiError> {
        self.load_owned(caller_id, bookmark_id).await?;
        self.store.delete_bookmark(bookmark_id).await?;
        info!("User {} deleted bookmark {}", caller_id, bookmark_id);
        Ok(())
    }

    /// Missing and foreign bookmarks are both reported as the same denial
    async fn load_owned(&self, caller_id: i64, bookmark_id: i64) -> Result<Bookmark, ApiError> {
        let Some(bookmark) = self.store.find_bookmark(bookmark_id).await? else {
            warn!("User {} denied bookmark {}: not found", caller_id, bookmark_id);
            return Err(ApiError::access_denied());
        };

        match authorize_resource(caller_id, &bookmark) {
            Access::Allowed => Ok(bookmark),
            Access::Denied => {
                warn!(
                    "User {} denied bookmark {}: owned by user {}",
                    caller_id, bookmark_id, bookmark.user_id
                );
                Err(ApiError::access_denied())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::MemoryStore;
    use crate::error::ACCESS_DENIED;

    async fn setup() -> (BookmarkService, Arc<MemoryStore>, i64, i64) {
        let store = Arc::new(MemoryStore::new());
        let mut ids = Vec::new();
        for email in ["a@x.com", "b@x.com"] {
            let user = store
                .create_user(NewUser {
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        (BookmarkService::new(store.clone()), store, ids[0], ids[1])
    }

    #[tokio::test]
    async fn round_trip_create_get_edit_delete() {
        let (service, _store, alice, _bob) = setup().await;

        let created = service
            .create(alice, "T".to_string(), "L".to_string(), None)
            .await
            .unwrap();
        assert_eq!(service.get(alice, created.id).await.unwrap(), created);

        let changes = BookmarkChanges {
            title: Some("T2".to_string()),
            ..Default::default()
        };
        let edited = service.edit(alice, created.id, changes).await.unwrap();
        assert_eq!(edited.title, "T2");
        assert_eq!(edited.link, "L");

        service.delete(alice, created.id).await.unwrap();
        assert!(service.list(alice).await.unwrap().is_empty());
        assert_eq!(service.get(alice, created.id).await.unwrap_err().status_code(), 403);
    }

    #[tokio::test]
    async fn list_grows_with_creates() {
        let (service, _store, alice, _bob) = setup().await;
        assert!(service.list(alice).await.unwrap().is_empty());

        for i in 0..3 {
            service
                .create(alice, format!("T{}", i), "L".to_string(), None)
                .await
                .unwrap();
        }
        assert_eq!(service.list(alice).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn foreign_bookmark_is_denied_and_untouched() {
        let (service, store, alice, bob) = setup().await;
        let created = service
            .create(alice, "T".to_string(), "L".to_string(), Some("D".to_string()))
            .await
            .unwrap();

        let changes = BookmarkChanges {
            title: Some("hijacked".to_string()),
            ..Default::default()
        };
        let err = service.edit(bob, created.id, changes).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), ACCESS_DENIED);

        assert_eq!(service.delete(bob, created.id).await.unwrap_err().status_code(), 403);
        assert_eq!(service.get(bob, created.id).await.unwrap_err().status_code(), 403);

        let stored = store.find_bookmark(created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn create_for_vanished_account_is_not_found() {
        let (service, store, _alice, _bob) = setup().await;

        let err = service
            .create(4242, "T".to_string(), "L".to_string(), None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found");
        assert!(store.find_bookmark(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn description_can_be_cleared() {
        let (service, _store, alice, _bob) = setup().await;
        let created = service
            .create(alice, "T".to_string(), "L".to_string(), Some("D".to_string()))
            .await
            .unwrap();

        let changes = BookmarkChanges {
            description: Some(None),
            ..Default::default()
        };
        let edited = service.edit(alice, created.id, changes).await.unwrap();
        assert_eq!(edited.description, None);
        assert_eq!(edited.title, "T");
    }

    #[tokio::test]
    async fn missing_bookmark_looks_like_foreign_bookmark() {
        let (service, _store, alice, bob) = setup().await;
        let created = service
            .create(alice, "T".to_string(), "L".to_string(), None)
            .await
            .unwrap();

        let foreign = service.get(bob, created.id).await.unwrap_err();
        let missing = service.get(bob, 9999).await.unwrap_err();
        assert_eq!(foreign.status_code(), missing.status_code());
        assert_eq!(foreign.message(), missing.message());
    }
}
