use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiResult};
use crate::models::{Credentials, PublicUser};

/// POST /register - Register new user account
///
/// Expected Input:
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "id": 1, "email": "ada@example.com" }
/// ```
///
/// The password hash and the bearer token are never returned; the token
/// is obtained through `POST /login`.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<ApiJson<PublicUser>> {
    let user = state.users.register(credentials).await?;
    Ok(ApiJson(user))
}
