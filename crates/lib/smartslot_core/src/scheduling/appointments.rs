//! Appointment queries.
//!
//! Booking and cancellation run in a transaction so the slot status and
//! the appointment row always move together.

use sqlx::PgPool;
use uuid::Uuid;

use super::SchedulingError;
use crate::models::scheduling::Appointment;
use crate::uuid::uuidv7;

const APPOINTMENT_COLUMNS: &str = "id, slot_id, user_id, notes, status, created_at";

/// Book an available slot for a user.
///
/// The slot is flipped to `booked` and the appointment created in one
/// transaction; a missing or already-booked slot fails validation.
pub async fn book_appointment(
    pool: &PgPool,
    slot_id: Uuid,
    user_id: Uuid,
    notes: Option<&str>,
) -> Result<Appointment, SchedulingError> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query_scalar::<_, Uuid>(
        "UPDATE slots SET status = 'booked' \
         WHERE id = $1 AND status = 'available' RETURNING id",
    )
    .bind(slot_id)
    .fetch_optional(&mut *tx)
    .await?;

    if claimed.is_none() {
        return Err(SchedulingError::Validation(
            "Slot is not available for booking".into(),
        ));
    }

    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "INSERT INTO appointments (id, slot_id, user_id, notes) \
         VALUES ($1, $2, $3, $4) RETURNING {APPOINTMENT_COLUMNS}",
    ))
    .bind(uuidv7())
    .bind(slot_id)
    .bind(user_id)
    .bind(notes)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(appointment)
}

/// Cancel a confirmed appointment, releasing its slot.
///
/// Non-admins can only cancel their own appointments; cancelling an
/// already-cancelled (or foreign) appointment fails validation.
pub async fn cancel_appointment(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<Appointment, SchedulingError> {
    let mut tx = pool.begin().await?;

    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "UPDATE appointments SET status = 'cancelled' \
         WHERE id = $1 AND status = 'confirmed' AND (user_id = $2 OR $3) \
         RETURNING {APPOINTMENT_COLUMNS}",
    ))
    .bind(id)
    .bind(user_id)
    .bind(is_admin)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| SchedulingError::Validation("Appointment cannot be cancelled".into()))?;

    sqlx::query("UPDATE slots SET status = 'available' WHERE id = $1")
        .bind(appointment.slot_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(appointment)
}

/// List a user's appointments newest-first (all users when `user_id` is
/// `None`), returning one page plus the total.
pub async fn list_appointments(
    pool: &PgPool,
    user_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Appointment>, i64), SchedulingError> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM appointments WHERE ($1::uuid IS NULL OR user_id = $1)",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    let appointments = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
         WHERE ($1::uuid IS NULL OR user_id = $1) \
         ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((appointments, total))
}

/// Fetch one of a user's appointments (any appointment for admins).
pub async fn get_appointment(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    is_admin: bool,
) -> Result<Option<Appointment>, SchedulingError> {
    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
         WHERE id = $1 AND (user_id = $2 OR $3)",
    ))
    .bind(id)
    .bind(user_id)
    .bind(is_admin)
    .fetch_optional(pool)
    .await?;
    Ok(appointment)
}
