use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};

/// Point queries over users and bookmarks.
///
/// Every method is a single-row (or single-owner) operation; implementations
/// rely on their own per-row atomicity and add no locking across calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Fails with `UniqueViolation` when the email is already registered
    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `NotFound` when no user has this id
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, DatabaseError>;

    /// Bookmarks owned by `user_id`, ascending by id
    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, DatabaseError>;

    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, DatabaseError>;

    async fn create_bookmark(&self, new_bookmark: NewBookmark) -> Result<Bookmark, DatabaseError>;

    /// Fails with `NotFound` when no bookmark has this id
    async fn update_bookmark(&self, id: i64, changes: BookmarkChanges) -> Result<Bookmark, DatabaseError>;

    /// Fails with `NotFound` when no bookmark has this id
    async fn delete_bookmark(&self, id: i64) -> Result<(), DatabaseError>;
}
