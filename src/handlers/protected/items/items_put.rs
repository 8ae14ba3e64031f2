use axum::{extract::State, Extension};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiResult, AuthUser};
use crate::models::ItemPatch;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateItemsRequest {
    pub ids: Vec<i64>,
    pub item: ItemPatch,
}

/// PUT /updateitems - patch several items at once
///
/// Expected Input:
/// ```json
/// { "ids": [2, 99], "item": { "name": "X", "price": 0 } }
/// ```
///
/// Expected Output:
/// ```json
/// { "2": true }
/// ```
///
/// Only ids that matched an item appear in the output. An empty name or a
/// zero price leaves that field untouched.
pub async fn items_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<UpdateItemsRequest>,
) -> ApiResult<ApiJson<BTreeMap<i64, bool>>> {
    let updated = state.items.bulk_update(&request.ids, &request.item).await?;
    info!(
        user_id = user.id,
        "{} of {} requested items updated by {}",
        updated.len(),
        request.ids.len(),
        user.email
    );
    Ok(ApiJson(updated))
}
