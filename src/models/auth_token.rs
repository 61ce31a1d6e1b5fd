//! Bearer token model for authentication.
//!
//! Tokens are stored as SHA-256 hashes. An incoming `Bearer <token>` header
//! is hashed and looked up against this table; inactive rows are rejected,
//! which allows revocation without deleting the record.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Row of the `auth_tokens` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub id: Uuid,

    /// SHA-256 hash of the bearer token (64 hex characters)
    pub token_hash: String,

    /// User this token authenticates as
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    /// Revoked tokens stay in the table with this flag cleared
    pub is_active: bool,
}
