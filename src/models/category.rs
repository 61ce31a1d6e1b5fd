//! Transaction category models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Row of the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,

    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Category as embedded in transaction responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
}
