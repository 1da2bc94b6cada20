//! Item API Endpoints
//! Mission: Authenticated CRUD over each user's items

use crate::app::AppState;
use crate::auth::models::Claims;
use crate::items::{
    models::{
        CreateItemRequest, DeleteItemResponse, ItemListResponse, ItemResponse, UpdateItemRequest,
    },
    store::ItemFields,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use tracing::error;

/// Create item - POST /api/items/create
pub async fn create_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ItemApiError> {
    let Some(title) = payload.title.filter(|t| !t.is_empty()) else {
        return Err(ItemApiError::MissingTitle);
    };

    let item = state
        .item_store
        .create(
            claims.sub,
            ItemFields {
                title,
                description: payload.description.filter(|d| !d.is_empty()),
                status: payload
                    .status
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "active".to_string()),
            },
        )
        .map_err(ItemApiError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            message: "Item created successfully".to_string(),
            item,
        }),
    ))
}

/// List items - GET /api/items/list
pub async fn get_items(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ItemListResponse>, ItemApiError> {
    let items = state
        .item_store
        .list_by_owner(claims.sub)
        .map_err(ItemApiError::internal)?;

    Ok(Json(ItemListResponse {
        message: "Items found".to_string(),
        count: items.len(),
        items,
    }))
}

/// Get item - GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ItemApiError> {
    let item = state
        .item_store
        .get_by_owner(claims.sub, id)
        .map_err(ItemApiError::internal)?
        .ok_or(ItemApiError::NotFound)?;

    Ok(Json(ItemResponse {
        message: "Item found".to_string(),
        item,
    }))
}

/// Update item - PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ItemApiError> {
    let item = state
        .item_store
        .get_by_owner(claims.sub, id)
        .map_err(ItemApiError::internal)?
        .ok_or(ItemApiError::NotFound)?;

    let title = match payload.title {
        Some(t) if t.is_empty() => return Err(ItemApiError::MissingTitle),
        Some(t) => t,
        None => item.title,
    };

    // Outer None keeps the stored value; an explicit null clears it
    let description = match payload.description {
        Some(d) => d.filter(|d| !d.is_empty()),
        None => item.description,
    };

    let status = payload
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or(item.status);

    let updated = state
        .item_store
        .update(
            claims.sub,
            id,
            &ItemFields {
                title,
                description,
                status,
            },
        )
        .map_err(ItemApiError::internal)?;
    if !updated {
        return Err(ItemApiError::NotFound);
    }

    // Re-read so the response reflects authoritative stored values
    let item = state
        .item_store
        .get_by_owner(claims.sub, id)
        .map_err(ItemApiError::internal)?
        .ok_or(ItemApiError::NotFound)?;

    Ok(Json(ItemResponse {
        message: "Item updated successfully".to_string(),
        item,
    }))
}

/// Delete item - DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteItemResponse>, ItemApiError> {
    let item = state
        .item_store
        .get_by_owner(claims.sub, id)
        .map_err(ItemApiError::internal)?
        .ok_or(ItemApiError::NotFound)?;

    let deleted = state
        .item_store
        .delete(claims.sub, id)
        .map_err(ItemApiError::internal)?;
    if !deleted {
        return Err(ItemApiError::NotFound);
    }

    Ok(Json(DeleteItemResponse {
        message: format!("'{}' deleted successfully", item.title),
    }))
}

/// Item API errors
#[derive(Debug)]
pub enum ItemApiError {
    MissingTitle,
    NotFound,
    InternalError,
}

impl ItemApiError {
    /// Log the underlying failure server-side, surface a generic 500
    fn internal(err: anyhow::Error) -> Self {
        error!("Item operation failed: {:#}", err);
        ItemApiError::InternalError
    }
}

impl IntoResponse for ItemApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ItemApiError::MissingTitle => (StatusCode::BAD_REQUEST, "Title is required"),
            ItemApiError::NotFound => (StatusCode::NOT_FOUND, "Item not found"),
            ItemApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
