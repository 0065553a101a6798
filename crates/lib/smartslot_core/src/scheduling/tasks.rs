//! Task queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::SchedulingError;
use crate::models::scheduling::Task;
use crate::uuid::uuidv7;

const TASK_COLUMNS: &str = "id, owner_id, title, description, status, created_at, updated_at";

/// Create a task for a user.
pub async fn create_task(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<Task, SchedulingError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, owner_id, title, description) \
         VALUES ($1, $2, $3, $4) RETURNING {TASK_COLUMNS}",
    ))
    .bind(uuidv7())
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(task)
}

/// List a user's tasks newest-first, returning one page plus the total.
pub async fn list_tasks(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Task>, i64), SchedulingError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 \
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    ))
    .bind(owner_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((tasks, total))
}

/// Fetch one of a user's tasks.
pub async fn get_task(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Task>, SchedulingError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2",
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Update a task's title/description/status; absent fields keep their value.
pub async fn update_task(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
) -> Result<Option<Task>, SchedulingError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET \
             title = COALESCE($3, title), \
             description = COALESCE($4, description), \
             status = COALESCE($5, status), \
             updated_at = now() \
         WHERE id = $1 AND owner_id = $2 RETURNING {TASK_COLUMNS}",
    ))
    .bind(id)
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Delete one of a user's tasks, returning false when it does not exist.
pub async fn delete_task(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, SchedulingError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
