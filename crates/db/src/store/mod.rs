//! The backend-collaborator port.
//!
//! Handlers never touch SQL directly; they go through [`PortalStore`], which
//! covers credential and session persistence, profile and catalog reads, and
//! enrollment writes. Two adapters exist:
//!
//! - [`pg::PgStore`] -- PostgreSQL via the [`crate::repositories`] layer.
//! - [`memory::MemoryStore`] -- an in-process store with the same constraint
//!   semantics, used for local development and tests.

use async_trait::async_trait;
use portal_core::types::DbId;

use crate::models::account::{Account, CreateAccount};
use crate::models::course::Course;
use crate::models::enrollment::{CreateEnrollment, Enrollment, EnrollmentWithCourse};
use crate::models::profile::Profile;
use crate::models::session::{CreateSession, UserSession};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Names of the uniqueness constraints callers are allowed to match on.
pub mod constraints {
    pub const ACCOUNTS_EMAIL: &str = "uq_accounts_email";
    pub const COURSES_SLUG: &str = "uq_courses_slug";
    pub const ENROLLMENTS_USER_COURSE: &str = "uq_enrollments_user_course";
    pub const SESSIONS_REFRESH_TOKEN: &str = "uq_user_sessions_refresh_token_hash";
}

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors surfaced by a [`PortalStore`] adapter.
///
/// Constraint violations carry the constraint name so callers can tell an
/// expected duplicate apart from a genuine failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("insert or update violates foreign key constraint: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this is a unique violation of exactly `constraint`.
    pub fn violates(&self, constraint: &str) -> bool {
        matches!(self, StoreError::UniqueViolation { constraint: c } if c == constraint)
    }

    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::UniqueViolation { .. } => "unique_violation",
            StoreError::ForeignKeyViolation { .. } => "foreign_key_violation",
            StoreError::Database(_) => "database",
            StoreError::Unavailable(_) => "unavailable",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            let code = db_err.code();
            let classified = match code.as_deref() {
                Some(UNIQUE_VIOLATION) => Some(StoreError::UniqueViolation { constraint }),
                Some(FOREIGN_KEY_VIOLATION) => Some(StoreError::ForeignKeyViolation { constraint }),
                _ => None,
            };
            if let Some(classified) = classified {
                tracing::debug!(
                    sqlstate = code.as_deref().unwrap_or_default(),
                    kind = classified.kind(),
                    error = %classified,
                    "Classified database constraint error"
                );
                return classified;
            }
            tracing::debug!(
                sqlstate = code.as_deref().unwrap_or("none"),
                "Unclassified database error"
            );
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Confirm the store can serve requests.
    async fn health_check(&self) -> StoreResult<()>;

    /// Create an account and its profile atomically.
    ///
    /// Fails with [`constraints::ACCOUNTS_EMAIL`] when the email is taken.
    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account>;

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn create_session(&self, input: &CreateSession) -> StoreResult<UserSession>;

    /// Find a session that is neither revoked nor expired.
    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<UserSession>>;

    /// Find an active session by the SHA-256 hash of its refresh token.
    async fn find_session_by_refresh_token_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<UserSession>>;

    /// Revoke one session. Returns `true` if it was active.
    async fn revoke_session(&self, id: DbId) -> StoreResult<bool>;

    /// Revoke every active session of a user, returning how many were active.
    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64>;

    /// Delete expired or revoked sessions, returning how many were removed.
    async fn cleanup_expired_sessions(&self) -> StoreResult<u64>;

    async fn find_profile(&self, user_id: DbId) -> StoreResult<Option<Profile>>;

    /// All courses, oldest first (ties broken by id).
    async fn list_courses(&self) -> StoreResult<Vec<Course>>;

    async fn find_course_by_slug(&self, slug: &str) -> StoreResult<Option<Course>>;

    /// Insert one enrollment.
    ///
    /// Fails with [`constraints::ENROLLMENTS_USER_COURSE`] when the pair is
    /// already enrolled.
    async fn create_enrollment(&self, input: &CreateEnrollment) -> StoreResult<Enrollment>;

    /// A user's enrollments joined with their courses, most recent first
    /// (ties broken by id, descending).
    async fn list_enrollments_for_user(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<EnrollmentWithCourse>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violates_matches_only_the_named_constraint() {
        let err = StoreError::UniqueViolation {
            constraint: constraints::ENROLLMENTS_USER_COURSE.to_string(),
        };
        assert!(err.violates(constraints::ENROLLMENTS_USER_COURSE));
        assert!(!err.violates(constraints::ACCOUNTS_EMAIL));
    }

    #[test]
    fn other_errors_never_count_as_violations() {
        let err = StoreError::Unavailable("down".into());
        assert!(!err.violates(constraints::ENROLLMENTS_USER_COURSE));
        assert_eq!(err.kind(), "unavailable");

        let err = StoreError::ForeignKeyViolation {
            constraint: "enrollments_course_id_fkey".into(),
        };
        assert!(!err.violates(constraints::ENROLLMENTS_USER_COURSE));
    }

    #[test]
    fn row_not_found_is_a_plain_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), "database");
    }
}
