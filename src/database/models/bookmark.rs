use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: i64,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
}

/// Partial bookmark update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub link: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.link.is_none() && self.description.is_none()
    }
}
