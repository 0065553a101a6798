//! Slot request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use smartslot_core::models::scheduling::Slot;
use smartslot_core::pagination::{Page, PageQuery};
use smartslot_core::scheduling::{resources, slots};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::CreateSlotRequest;

/// `GET /resources/{id}/slots` — a resource's slots in time order.
pub async fn list_slots_handler(
    State(state): State<AppState>,
    Path(resource_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<Slot>>> {
    let (items, total) =
        slots::list_slots_by_resource(&state.pool, resource_id, page.limit(), page.offset())
            .await?;
    Ok(Json(Page::new(items, total, page.page(), page.limit())))
}

/// `POST /resources/{id}/slots` — publish a slot on a resource.
pub async fn create_slot_handler(
    State(state): State<AppState>,
    Path(resource_id): Path<Uuid>,
    Json(body): Json<CreateSlotRequest>,
) -> AppResult<(StatusCode, Json<Slot>)> {
    resources::get_resource(&state.pool, resource_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resource not found".into()))?;

    let slot = slots::create_slot(&state.pool, resource_id, body.starts_at, body.ends_at).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// `GET /slots/{id}` — fetch a slot.
pub async fn get_slot_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Slot>> {
    let slot = slots::get_slot(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Slot not found".into()))?;
    Ok(Json(slot))
}

/// `DELETE /slots/{id}` — remove a slot.
pub async fn delete_slot_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !slots::delete_slot(&state.pool, id).await? {
        return Err(AppError::NotFound("Slot not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
