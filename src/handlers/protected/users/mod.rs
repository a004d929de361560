// handlers/protected/users/mod.rs - Current user profile

use axum::{extract::State, Extension};
use serde::{de::IgnoredAny, Deserialize};

use crate::api::{reject_blank, Validate, ValidatedJson};
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// PATCH /users body. Email is immutable: existing clients may still send
/// it, and it is read and discarded. Any other unknown field is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, rename = "email")]
    _email: Option<IgnoredAny>,
}

impl Validate for EditUserDto {
    fn validate(&self) -> Result<(), ApiError> {
        reject_blank("firstName", self.first_name.as_deref())?;
        reject_blank("lastName", self.last_name.as_deref())?;
        Ok(())
    }
}

impl From<EditUserDto> for UserChanges {
    fn from(dto: EditUserDto) -> Self {
        UserChanges {
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

/// GET /users/me - Profile of the authenticated caller
pub async fn me_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<User> {
    let user = state.users.me(auth.user_id).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /users - Partial update of the caller's profile
pub async fn users_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<EditUserDto>,
) -> ApiResult<User> {
    let user = state.users.edit(auth.user_id, body.into()).await?;
    Ok(ApiResponse::success(user))
}
