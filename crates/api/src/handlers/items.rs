//! `items.*` routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use store::ObjectId;
use tracing::info;

use crate::error::ApiError;
use crate::input::RequestInput;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct CreateItemInput {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListItemsInput {
    limit: Option<i64>,
}

/// Item ids always come from the `id` query parameter
fn item_id(input: &RequestInput) -> Result<ObjectId, ApiError> {
    let id = input.query_param("id").unwrap_or_default();
    ObjectId::parse_str(&id).map_err(|_| ApiError::bad_request("invalid id"))
}

/// Create an item (GET/POST /items.create)
pub async fn create_item(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let items = state.items()?;

    let params: CreateItemInput = input
        .params()
        .await
        .map_err(|_| ApiError::bad_request("invalid JSON"))?;
    let name = params.name.unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let item = items.create(&name).await?;
    info!("Created item {} ({})", item.id, item.name);
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// Fetch one item (GET/POST /items.get?id=...)
pub async fn get_item(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let items = state.items()?;
    let id = item_id(&input)?;

    match items.get(&id).await? {
        Some(item) => Ok(Json(item).into_response()),
        None => Err(ApiError::NotFound),
    }
}

/// List items newest first (GET/POST /items.list)
///
/// `limit` is read from the query string, or from the JSON body on POST.
/// Missing or non-positive limits use the default page size.
pub async fn list_items(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let items = state.items()?;

    let limit = match input.query_param("limit") {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request("invalid limit"))?,
        None if input.is_get() => 0,
        None => input
            .json::<ListItemsInput>()
            .await
            .ok()
            .and_then(|params| params.limit)
            .unwrap_or(0),
    };

    let listed = items.list(limit).await?;
    Ok(Json(json!({ "items": listed })).into_response())
}

/// Delete an item (GET/POST /items.delete?id=...)
pub async fn delete_item(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let items = state.items()?;
    let id = item_id(&input)?;

    if !items.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!("Deleted item {}", id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
