//! Account (credential) model and DTOs.

use portal_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an account together with its profile.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}
