//! Diesel row models for group persistence.

use super::schema::groups;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for group records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GroupRow {
    /// Internal group identifier.
    pub id: uuid::Uuid,
    /// Group name.
    pub name: String,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Member user identifiers.
    pub members: Vec<uuid::Uuid>,
    /// Unique invite code.
    pub invite_code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
