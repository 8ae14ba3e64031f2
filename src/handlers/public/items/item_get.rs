use axum::extract::{Path, State};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResult};
use crate::models::Item;

/// GET /items/:id - a single item
///
/// 400 when the id is not an integer, 404 with
/// `{"error": "no item with id: <id>"}` when nothing matches.
pub async fn item_get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<ApiJson<Item>> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid id: {}", raw_id)))?;

    let item = state
        .items
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("no item with id: {}", id)))?;

    Ok(ApiJson(item))
}
