//! Appointment request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use smartslot_core::models::scheduling::Appointment;
use smartslot_core::pagination::{Page, PageQuery};
use smartslot_core::scheduling::appointments;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::BookAppointmentRequest;

/// `GET /appointments` — the caller's appointments; admins see all.
pub async fn list_appointments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<Appointment>>> {
    let scope = if user.is_admin() {
        None
    } else {
        Some(user.user_id()?)
    };
    let (items, total) =
        appointments::list_appointments(&state.pool, scope, page.limit(), page.offset()).await?;
    Ok(Json(Page::new(items, total, page.page(), page.limit())))
}

/// `POST /appointments` — book an available slot.
pub async fn book_appointment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<BookAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = appointments::book_appointment(
        &state.pool,
        body.slot_id,
        user.user_id()?,
        body.notes.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /appointments/{id}` — fetch one appointment.
pub async fn get_appointment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    let appointment =
        appointments::get_appointment(&state.pool, id, user.user_id()?, user.is_admin())
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;
    Ok(Json(appointment))
}

/// `POST /appointments/{id}/cancel` — cancel and release the slot.
pub async fn cancel_appointment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    let appointment =
        appointments::cancel_appointment(&state.pool, id, user.user_id()?, user.is_admin())
            .await?;
    Ok(Json(appointment))
}
