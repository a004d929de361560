// handlers/public/auth/signin.rs - POST /auth/signin handler

use axum::extract::State;

use super::AuthDto;
use crate::api::ValidatedJson;
use crate::auth::AuthToken;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/signin - Exchange credentials for a bearer token
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn signin_post(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<AuthDto>,
) -> ApiResult<AuthToken> {
    let token = state.auth.signin(&body.email, &body.password).await?;
    Ok(ApiResponse::success(token))
}
