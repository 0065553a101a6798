//! Admin request handlers — user management. Admin-only via the router's
//! role guard.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use smartslot_core::auth::queries;
use smartslot_core::models::auth::User;
use smartslot_core::pagination::{Page, PageQuery};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::SetRoleRequest;

/// `GET /admin/users` — paginated user list.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<User>>> {
    let (items, total) = queries::list_users(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(Page::new(items, total, page.page(), page.limit())))
}

/// `PATCH /admin/users/{id}/role` — set a user's role.
///
/// Roles are an open set; the new role reaches the user's tokens at
/// their next refresh.
pub async fn set_role_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetRoleRequest>,
) -> AppResult<StatusCode> {
    let role = body.role.trim();
    if role.is_empty() {
        return Err(AppError::Validation("Role must not be empty".into()));
    }
    if !queries::set_user_role(&state.pool, &id.to_string(), role).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/users/{id}` — delete a user and their owned rows.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !queries::delete_user(&state.pool, &id.to_string()).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
