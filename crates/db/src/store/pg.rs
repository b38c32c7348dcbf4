//! PostgreSQL adapter for [`PortalStore`].

use async_trait::async_trait;
use portal_core::types::DbId;

use crate::models::account::{Account, CreateAccount};
use crate::models::course::Course;
use crate::models::enrollment::{CreateEnrollment, Enrollment, EnrollmentWithCourse};
use crate::models::profile::Profile;
use crate::models::session::{CreateSession, UserSession};
use crate::repositories::{AccountRepo, CourseRepo, EnrollmentRepo, ProfileRepo, SessionRepo};
use crate::store::{PortalStore, StoreResult};
use crate::DbPool;

/// [`PortalStore`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PortalStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account> {
        Ok(AccountRepo::create_with_profile(&self.pool, input).await?)
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(AccountRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_session(&self, input: &CreateSession) -> StoreResult<UserSession> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<UserSession>> {
        Ok(SessionRepo::find_active(&self.pool, id).await?)
    }

    async fn find_session_by_refresh_token_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<UserSession>> {
        Ok(SessionRepo::find_by_refresh_token_hash(&self.pool, hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64> {
        Ok(SessionRepo::revoke_all_for_user(&self.pool, user_id).await?)
    }

    async fn cleanup_expired_sessions(&self) -> StoreResult<u64> {
        Ok(SessionRepo::cleanup_expired(&self.pool).await?)
    }

    async fn find_profile(&self, user_id: DbId) -> StoreResult<Option<Profile>> {
        Ok(ProfileRepo::find_by_user(&self.pool, user_id).await?)
    }

    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(CourseRepo::list(&self.pool).await?)
    }

    async fn find_course_by_slug(&self, slug: &str) -> StoreResult<Option<Course>> {
        Ok(CourseRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn create_enrollment(&self, input: &CreateEnrollment) -> StoreResult<Enrollment> {
        Ok(EnrollmentRepo::create(&self.pool, input).await?)
    }

    async fn list_enrollments_for_user(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<EnrollmentWithCourse>> {
        Ok(EnrollmentRepo::list_for_user(&self.pool, user_id).await?)
    }
}
