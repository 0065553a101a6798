//! Scheduling domain: tasks, resources, slots, and appointments.

pub mod appointments;
pub mod resources;
pub mod slots;
pub mod tasks;

use thiserror::Error;

/// Scheduling errors.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}
