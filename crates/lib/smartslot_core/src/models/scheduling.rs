//! Scheduling domain models.
//!
//! These derive `sqlx::FromRow` so queries can map rows directly, and
//! serialize camelCase for the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workflow task owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bookable resource (a room, a machine, a practitioner, ...).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

/// A time window on a resource that can be booked.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A booking of a slot by a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub user_id: Uuid,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Task statuses accepted by the API.
pub const TASK_STATUSES: &[&str] = &["pending", "in_progress", "done"];

/// Slot availability states.
pub const SLOT_AVAILABLE: &str = "available";
pub const SLOT_BOOKED: &str = "booked";

/// Appointment states.
pub const APPOINTMENT_CONFIRMED: &str = "confirmed";
pub const APPOINTMENT_CANCELLED: &str = "cancelled";
