use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};
use crate::database::store::Store;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    bookmarks: BTreeMap<i64, Bookmark>,
    next_user_id: i64,
    next_bookmark_id: i64,
}

/// In-process store with the same contract as `PgStore`.
/// Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.next_user_id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))?;

        if let Some(first_name) = changes.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = Some(last_name);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookmarks
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, DatabaseError> {
        Ok(self.tables.read().await.bookmarks.get(&id).cloned())
    }

    async fn create_bookmark(&self, new_bookmark: NewBookmark) -> Result<Bookmark, DatabaseError> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on bookmarks.user_id
        if !tables.users.contains_key(&new_bookmark.user_id) {
            return Err(DatabaseError::QueryError(format!(
                "bookmark owner {} does not exist",
                new_bookmark.user_id
            )));
        }

        tables.next_bookmark_id += 1;
        let now = Utc::now();
        let bookmark = Bookmark {
            id: tables.next_bookmark_id,
            user_id: new_bookmark.user_id,
            title: new_bookmark.title,
            link: new_bookmark.link,
            description: new_bookmark.description,
            created_at: now,
            updated_at: now,
        };
        tables.bookmarks.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update_bookmark(&self, id: i64, changes: BookmarkChanges) -> Result<Bookmark, DatabaseError> {
        let mut tables = self.tables.write().await;
        let bookmark = tables
            .bookmarks
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("bookmark {}", id)))?;

        if let Some(title) = changes.title {
            bookmark.title = title;
        }
        if let Some(link) = changes.link {
            bookmark.link = link;
        }
        if let Some(description) = changes.description {
            bookmark.description = description;
        }
        bookmark.updated_at = Utc::now();
        Ok(bookmark.clone())
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), DatabaseError> {
        self.tables
            .write()
            .await
            .bookmarks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("bookmark {}", id)))
    }
}
