use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Bookmark, BookmarkChanges, NewBookmark, NewUser, User, UserChanges};
use crate::database::store::Store;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, created_at, updated_at";
const BOOKMARK_COLUMNS: &str = "id, user_id, title, link, description, created_at, updated_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.first_name)
            .bind(changes.last_name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))
    }

    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, DatabaseError> {
        let sql = format!("SELECT {} FROM bookmarks WHERE user_id = $1 ORDER BY id", BOOKMARK_COLUMNS);
        let bookmarks = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(bookmarks)
    }

    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, DatabaseError> {
        let sql = format!("SELECT {} FROM bookmarks WHERE id = $1", BOOKMARK_COLUMNS);
        let bookmark = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(bookmark)
    }

    async fn create_bookmark(&self, new_bookmark: NewBookmark) -> Result<Bookmark, DatabaseError> {
        let sql = format!(
            "INSERT INTO bookmarks (user_id, title, link, description) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOKMARK_COLUMNS
        );
        let bookmark = sqlx::query_as::<_, Bookmark>(&sql)
            .bind(new_bookmark.user_id)
            .bind(&new_bookmark.title)
            .bind(&new_bookmark.link)
            .bind(&new_bookmark.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(bookmark)
    }

    async fn update_bookmark(&self, id: i64, changes: BookmarkChanges) -> Result<Bookmark, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE bookmarks
            SET title = COALESCE($2, title),
                link = COALESCE($3, link),
                description = CASE WHEN $5 THEN $4 ELSE description END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BOOKMARK_COLUMNS
        );
        let set_description = changes.description.is_some();
        sqlx::query_as::<_, Bookmark>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.link)
            .bind(changes.description.flatten())
            .bind(set_description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("bookmark {}", id)))
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("bookmark {}", id)));
        }
        Ok(())
    }
}
