// handlers/public/auth/signup.rs - POST /auth/signup handler

use axum::extract::State;

use super::AuthDto;
use crate::api::ValidatedJson;
use crate::auth::AuthToken;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/signup - Register a new account and return its first token
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Responds 201 with `{ "access_token": "..." }`, 409 when the email is
/// already registered.
pub async fn signup_post(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<AuthDto>,
) -> ApiResult<AuthToken> {
    let token = state.auth.signup(&body.email, &body.password).await?;
    Ok(ApiResponse::created(token))
}
