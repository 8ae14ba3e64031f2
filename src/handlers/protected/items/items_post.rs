use axum::{extract::State, http::StatusCode, Extension};
use tracing::info;

use crate::app::AppState;
use crate::middleware::{ApiJson, ApiResult, AuthUser};
use crate::models::{Item, NewItem};

/// POST /items - add an item to the catalog
///
/// Expected Input:
/// ```json
/// { "name": "pen", "price": 1.5 }
/// ```
///
/// Responds 201 with the stored item, including its assigned id.
pub async fn items_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(new_item): ApiJson<NewItem>,
) -> ApiResult<(StatusCode, ApiJson<Item>)> {
    let item = state.items.create(new_item).await?;
    info!(user_id = user.id, "Item {} created by {}", item.id, user.email);
    Ok((StatusCode::CREATED, ApiJson(item)))
}
