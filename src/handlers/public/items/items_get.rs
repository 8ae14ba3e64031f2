use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiResult};
use crate::models::Item;

/// GET /items - every item, in stored order
pub async fn items_get(State(state): State<AppState>) -> ApiResult<ApiJson<Vec<Item>>> {
    let items = state.items.list().await?;
    Ok(ApiJson(items))
}
