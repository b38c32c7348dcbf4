//! Repository for the `profiles` table.

use portal_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::Profile;

const COLUMNS: &str = "id, full_name, email, created_at";

/// Read-only access to user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile owned by `user_id`.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
