//! Task request handlers. All task routes are owner-scoped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use smartslot_core::models::scheduling::{TASK_STATUSES, Task};
use smartslot_core::pagination::{Page, PageQuery};
use smartslot_core::scheduling::tasks;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateTaskRequest, UpdateTaskRequest};

/// `GET /tasks` — the caller's tasks, paginated.
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<Task>>> {
    let owner_id = user.user_id()?;
    let (items, total) =
        tasks::list_tasks(&state.pool, owner_id, page.limit(), page.offset()).await?;
    Ok(Json(Page::new(items, total, page.page(), page.limit())))
}

/// `POST /tasks` — create a task for the caller.
pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    let task = tasks::create_task(
        &state.pool,
        user.user_id()?,
        body.title.trim(),
        body.description.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/{id}` — fetch one of the caller's tasks.
pub async fn get_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Task>> {
    let task = tasks::get_task(&state.pool, id, user.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    Ok(Json(task))
}

/// `PATCH /tasks/{id}` — update title/description/status.
pub async fn update_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    if let Some(status) = body.status.as_deref()
        && !TASK_STATUSES.contains(&status)
    {
        return Err(AppError::Validation(format!(
            "Status must be one of: {}",
            TASK_STATUSES.join(", ")
        )));
    }
    let task = tasks::update_task(
        &state.pool,
        id,
        user.user_id()?,
        body.title.as_deref(),
        body.description.as_deref(),
        body.status.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    Ok(Json(task))
}

/// `DELETE /tasks/{id}` — delete one of the caller's tasks.
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !tasks::delete_task(&state.pool, id, user.user_id()?).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
