//! Resource request handlers.
//!
//! Reads are open to any authenticated user; mutations sit behind the
//! staff/admin role guard in the router.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use smartslot_core::models::scheduling::Resource;
use smartslot_core::pagination::{Page, PageQuery};
use smartslot_core::scheduling::resources;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{CreateResourceRequest, UpdateResourceRequest};

/// `GET /resources` — paginated resource list.
pub async fn list_resources_handler(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<Resource>>> {
    let (items, total) = resources::list_resources(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(Page::new(items, total, page.page(), page.limit())))
}

/// `POST /resources` — create a resource.
pub async fn create_resource_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateResourceRequest>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".into()));
    }
    let capacity = body.capacity.unwrap_or(1);
    if capacity < 1 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }
    let resource = resources::create_resource(
        &state.pool,
        body.name.trim(),
        body.description.as_deref(),
        capacity,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// `GET /resources/{id}` — fetch a resource.
pub async fn get_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Resource>> {
    let resource = resources::get_resource(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;
    Ok(Json(resource))
}

/// `PATCH /resources/{id}` — update name/description/capacity.
pub async fn update_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateResourceRequest>,
) -> AppResult<Json<Resource>> {
    if let Some(capacity) = body.capacity
        && capacity < 1
    {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }
    let resource = resources::update_resource(
        &state.pool,
        id,
        body.name.as_deref(),
        body.description.as_deref(),
        body.capacity,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;
    Ok(Json(resource))
}

/// `DELETE /resources/{id}` — delete a resource and its slots.
pub async fn delete_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !resources::delete_resource(&state.pool, id).await? {
        return Err(AppError::NotFound("Resource not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
