//! Repository for the `accounts` table.

use sqlx::PgPool;

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Provides credential lookups and sign-up inserts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert an account and its profile in one transaction.
    ///
    /// A duplicate email surfaces as a `uq_accounts_email` unique violation.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateAccount,
    ) -> Result<Account, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO accounts (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO profiles (id, full_name, email) VALUES ($1, $2, $3)")
            .bind(account.id)
            .bind(&input.full_name)
            .bind(&account.email)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(account)
    }

    /// Find an account by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
