use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiResult};
use crate::models::{Credentials, TokenResponse};

/// POST /login - Authenticate and receive the account's bearer token
///
/// Expected Input:
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "9f86d081884c7d65..." }
/// ```
///
/// 404 when no account has the email, 401 when the password is wrong.
/// There is no rate limiting or lockout.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<ApiJson<TokenResponse>> {
    let token = state.users.login(credentials).await?;
    Ok(ApiJson(token))
}
