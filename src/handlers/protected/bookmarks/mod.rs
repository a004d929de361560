// handlers/protected/bookmarks/mod.rs - Per-user bookmark CRUD
//
// GET    /bookmarks      - list caller's bookmarks
// POST   /bookmarks      - create
// GET    /bookmarks/:id  - show
// PATCH  /bookmarks/:id  - partial update
// DELETE /bookmarks/:id  - remove

pub mod dto;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::api::ValidatedJson;
use crate::database::models::Bookmark;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

pub use dto::{CreateBookmarkDto, EditBookmarkDto};

pub async fn bookmarks_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<Bookmark>> {
    let bookmarks = state.bookmarks.list(auth.user_id).await?;
    Ok(ApiResponse::success(bookmarks))
}

pub async fn bookmarks_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateBookmarkDto>,
) -> ApiResult<Bookmark> {
    let bookmark = state
        .bookmarks
        .create(auth.user_id, body.title, body.link, body.description)
        .await?;
    Ok(ApiResponse::created(bookmark))
}

pub async fn bookmark_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Bookmark> {
    let Path(id) = id?;
    let bookmark = state.bookmarks.get(auth.user_id, id).await?;
    Ok(ApiResponse::success(bookmark))
}

pub async fn bookmark_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(body): ValidatedJson<EditBookmarkDto>,
) -> ApiResult<Bookmark> {
    let Path(id) = id?;
    let bookmark = state.bookmarks.edit(auth.user_id, id, body.into()).await?;
    Ok(ApiResponse::success(bookmark))
}

pub async fn bookmark_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.bookmarks.delete(auth.user_id, id).await?;
    Ok(ApiResponse::no_content())
}
