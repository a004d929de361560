use serde::{Deserialize, Deserializer};

use crate::api::{reject_blank, require_non_empty, Validate};
use crate::database::models::BookmarkChanges;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookmarkDto {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for CreateBookmarkDto {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("link", &self.link)?;
        Ok(())
    }
}

/// Omitted fields are left untouched; `"description": null` clears it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditBookmarkDto {
    pub title: Option<String>,
    pub link: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Validate for EditBookmarkDto {
    fn validate(&self) -> Result<(), ApiError> {
        reject_blank("title", self.title.as_deref())?;
        reject_blank("link", self.link.as_deref())?;
        Ok(())
    }
}

impl From<EditBookmarkDto> for BookmarkChanges {
    fn from(dto: EditBookmarkDto) -> Self {
        BookmarkChanges {
            title: dto.title,
            link: dto.link,
            description: dto.description,
        }
    }
}
