//! `object-members.*` routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use store::{ObjectMemberKey, ValidationError};
use tracing::info;

use crate::error::ApiError;
use crate::input::RequestInput;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct CreateLinkInput {
    object_id: Option<String>,
    member_id: Option<String>,
}

/// Either `id` or the (object_id, member_id) pair
#[derive(Debug, Default, Deserialize)]
struct DeleteLinkInput {
    id: Option<String>,
    object_id: Option<String>,
    member_id: Option<String>,
}

/// Link a member to an object (GET/POST /object-members.create)
pub async fn create_link(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let links = state.object_members()?;

    let params: CreateLinkInput = input
        .params()
        .await
        .map_err(|_| ApiError::from(ValidationError::MissingFields))?;
    let key = ObjectMemberKey::parse(
        params.object_id.unwrap_or_default(),
        params.member_id.unwrap_or_default(),
    )?;

    let link = links.create(&key).await?;
    info!("Linked {} to {}", link.member_id, link.object_id);
    Ok((StatusCode::CREATED, Json(link)).into_response())
}

/// Remove a link (GET/POST /object-members.delete)
///
/// A non-empty `id` wins and is used as given. Otherwise both `object_id`
/// and `member_id` are required and validated like on creation.
pub async fn delete_link(
    State(state): State<AppState>,
    input: RequestInput,
) -> Result<Response, ApiError> {
    let links = state.object_members()?;

    let params: DeleteLinkInput = input.params().await.unwrap_or_default();

    let deleted = match params.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            let deleted = links.delete_by_id(&id).await?;
            if deleted {
                info!("Deleted link {}", id);
            }
            deleted
        }
        None => {
            let object_id = params.object_id.unwrap_or_default();
            let member_id = params.member_id.unwrap_or_default();
            if object_id.is_empty() || member_id.is_empty() {
                return Err(ApiError::bad_request(
                    "provide id or both object_id and member_id",
                ));
            }

            let key = ObjectMemberKey::parse(object_id, member_id)?;
            let deleted = links.delete_by_pair(&key).await?;
            if deleted {
                info!("Deleted link {}", key.composite_id());
            }
            deleted
        }
    };

    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
