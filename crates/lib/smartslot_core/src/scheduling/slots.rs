//! Slot queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::SchedulingError;
use crate::models::scheduling::Slot;
use crate::uuid::uuidv7;

const SLOT_COLUMNS: &str = "id, resource_id, starts_at, ends_at, status, created_at";

/// Create a slot on a resource. The time window must be non-empty.
pub async fn create_slot(
    pool: &PgPool,
    resource_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<Slot, SchedulingError> {
    if ends_at <= starts_at {
        return Err(SchedulingError::Validation(
            "Slot must end after it starts".into(),
        ));
    }
    let slot = sqlx::query_as::<_, Slot>(&format!(
        "INSERT INTO slots (id, resource_id, starts_at, ends_at) \
         VALUES ($1, $2, $3, $4) RETURNING {SLOT_COLUMNS}",
    ))
    .bind(uuidv7())
    .bind(resource_id)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_one(pool)
    .await?;
    Ok(slot)
}

/// List a resource's slots in time order, returning one page plus the total.
pub async fn list_slots_by_resource(
    pool: &PgPool,
    resource_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Slot>, i64), SchedulingError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM slots WHERE resource_id = $1")
        .bind(resource_id)
        .fetch_one(pool)
        .await?;
    let slots = sqlx::query_as::<_, Slot>(&format!(
        "SELECT {SLOT_COLUMNS} FROM slots WHERE resource_id = $1 \
         ORDER BY starts_at ASC LIMIT $2 OFFSET $3",
    ))
    .bind(resource_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((slots, total))
}

/// Fetch a slot by ID.
pub async fn get_slot(pool: &PgPool, id: Uuid) -> Result<Option<Slot>, SchedulingError> {
    let slot =
        sqlx::query_as::<_, Slot>(&format!("SELECT {SLOT_COLUMNS} FROM slots WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(slot)
}

/// Delete a slot, returning false when it does not exist.
pub async fn delete_slot(pool: &PgPool, id: Uuid) -> Result<bool, SchedulingError> {
    let result = sqlx::query("DELETE FROM slots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
