//! Resource queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::SchedulingError;
use crate::models::scheduling::Resource;

const RESOURCE_COLUMNS: &str = "id, name, description, capacity, created_at";

/// Create a resource.
pub async fn create_resource(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
    capacity: i32,
) -> Result<Resource, SchedulingError> {
    let resource = sqlx::query_as::<_, Resource>(&format!(
        "INSERT INTO resources (name, description, capacity) \
         VALUES ($1, $2, $3) RETURNING {RESOURCE_COLUMNS}",
    ))
    .bind(name)
    .bind(description)
    .bind(capacity)
    .fetch_one(pool)
    .await?;
    Ok(resource)
}

/// List resources by name, returning one page plus the total.
pub async fn list_resources(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Resource>, i64), SchedulingError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resources")
        .fetch_one(pool)
        .await?;
    let resources = sqlx::query_as::<_, Resource>(&format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources ORDER BY name ASC LIMIT $1 OFFSET $2",
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((resources, total))
}

/// Fetch a resource by ID.
pub async fn get_resource(pool: &PgPool, id: Uuid) -> Result<Option<Resource>, SchedulingError> {
    let resource = sqlx::query_as::<_, Resource>(&format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(resource)
}

/// Update a resource; absent fields keep their value.
pub async fn update_resource(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    capacity: Option<i32>,
) -> Result<Option<Resource>, SchedulingError> {
    let resource = sqlx::query_as::<_, Resource>(&format!(
        "UPDATE resources SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             capacity = COALESCE($4, capacity) \
         WHERE id = $1 RETURNING {RESOURCE_COLUMNS}",
    ))
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(capacity)
    .fetch_optional(pool)
    .await?;
    Ok(resource)
}

/// Delete a resource (its slots cascade), returning false when missing.
pub async fn delete_resource(pool: &PgPool, id: Uuid) -> Result<bool, SchedulingError> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
