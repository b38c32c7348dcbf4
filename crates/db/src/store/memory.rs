//! In-process adapter for [`PortalStore`].
//!
//! All tables live behind one [`RwLock`], so every check-then-insert runs
//! under a single write guard and uniqueness holds exactly as it does with
//! the database constraints. The store also counts data reads and can be
//! told to fail specific operations, which the HTTP tests rely on.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use portal_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::account::{Account, CreateAccount};
use crate::models::course::Course;
use crate::models::enrollment::{CreateEnrollment, Enrollment, EnrollmentWithCourse};
use crate::models::profile::Profile;
use crate::models::session::{CreateSession, UserSession};
use crate::seed::{SeedCourse, COURSES};
use crate::store::{constraints, PortalStore, StoreError, StoreResult};

/// Operations that can be forced to fail with [`MemoryStore::fail_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateAccount,
    FindAccount,
    FindSession,
    FindProfile,
    ListCourses,
    FindCourse,
    CreateEnrollment,
    ListEnrollments,
}

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    profiles: Vec<Profile>,
    sessions: Vec<UserSession>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// [`PortalStore`] holding everything in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: Mutex<HashSet<StoreOp>>,
    data_reads: AtomicUsize,
}

impl MemoryStore {
    /// An empty store with no courses.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the seeded course catalog.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        let base = Utc::now() - chrono::Duration::minutes(COURSES.len() as i64);
        for (offset, seed) in COURSES.iter().enumerate() {
            let created_at = base + chrono::Duration::minutes(offset as i64);
            insert_course(&mut tables, seed, created_at);
        }

        Self {
            tables: RwLock::new(tables),
            ..Self::default()
        }
    }

    /// Add a course with an explicit creation time.
    pub async fn add_course(&self, seed: &SeedCourse, created_at: Timestamp) -> StoreResult<Course> {
        let mut tables = self.tables.write().await;
        if tables.courses.iter().any(|c| c.slug == seed.slug) {
            return Err(StoreError::UniqueViolation {
                constraint: constraints::COURSES_SLUG.into(),
            });
        }
        Ok(insert_course(&mut tables, seed, created_at))
    }

    /// Insert an enrollment with an explicit timestamp. The uniqueness rule
    /// still applies.
    pub async fn create_enrollment_at(
        &self,
        input: &CreateEnrollment,
        enrolled_at: Timestamp,
    ) -> StoreResult<Enrollment> {
        let mut tables = self.tables.write().await;
        insert_enrollment(&mut tables, input, enrolled_at)
    }

    /// Drop a profile row, leaving the account and its sessions in place.
    /// Returns `true` if a row was removed.
    pub async fn remove_profile(&self, user_id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.profiles.len();
        tables.profiles.retain(|p| p.id != user_id);
        tables.profiles.len() != before
    }

    /// Make every subsequent call of `op` fail with [`StoreError::Unavailable`].
    pub fn fail_on(&self, op: StoreOp) {
        self.failing_ops().insert(op);
    }

    /// Number of profile, catalog and enrollment operations issued so far.
    ///
    /// Credential and session lookups are not counted.
    pub fn data_reads(&self) -> usize {
        self.data_reads.load(Ordering::SeqCst)
    }

    /// Number of enrollments stored for one (user, course) pair.
    pub async fn enrollment_count(&self, user_id: DbId, course_id: DbId) -> usize {
        self.tables
            .read()
            .await
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id && e.course_id == course_id)
            .count()
    }

    fn failing_ops(&self) -> std::sync::MutexGuard<'_, HashSet<StoreOp>> {
        self.failing
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check(&self, op: StoreOp) -> StoreResult<()> {
        if self.failing_ops().contains(&op) {
            return Err(StoreError::Unavailable(format!("{op:?} forced to fail")));
        }
        Ok(())
    }

    fn count_data_read(&self, op: StoreOp) -> StoreResult<()> {
        self.data_reads.fetch_add(1, Ordering::SeqCst);
        self.check(op)
    }
}

fn insert_course(tables: &mut Tables, seed: &SeedCourse, created_at: Timestamp) -> Course {
    let course = Course {
        id: tables.next_id(),
        name: seed.name.to_string(),
        slug: seed.slug.to_string(),
        description: Some(seed.description.to_string()),
        icon: seed.icon.map(str::to_string),
        color: seed.color.map(str::to_string),
        created_at,
    };
    tables.courses.push(course.clone());
    course
}

fn insert_enrollment(
    tables: &mut Tables,
    input: &CreateEnrollment,
    enrolled_at: Timestamp,
) -> StoreResult<Enrollment> {
    if !tables.accounts.iter().any(|a| a.id == input.user_id) {
        return Err(StoreError::ForeignKeyViolation {
            constraint: "enrollments_user_id_fkey".into(),
        });
    }
    if !tables.courses.iter().any(|c| c.id == input.course_id) {
        return Err(StoreError::ForeignKeyViolation {
            constraint: "enrollments_course_id_fkey".into(),
        });
    }
    if tables
        .enrollments
        .iter()
        .any(|e| e.user_id == input.user_id && e.course_id == input.course_id)
    {
        return Err(StoreError::UniqueViolation {
            constraint: constraints::ENROLLMENTS_USER_COURSE.into(),
        });
    }

    let enrollment = Enrollment {
        id: tables.next_id(),
        user_id: input.user_id,
        course_id: input.course_id,
        enrolled_at,
    };
    tables.enrollments.push(enrollment.clone());
    Ok(enrollment)
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account> {
        self.check(StoreOp::CreateAccount)?;
        let mut tables = self.tables.write().await;

        if tables.accounts.iter().any(|a| a.email == input.email) {
            return Err(StoreError::UniqueViolation {
                constraint: constraints::ACCOUNTS_EMAIL.into(),
            });
        }

        let now = Utc::now();
        let account = Account {
            id: tables.next_id(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.profiles.push(Profile {
            id: account.id,
            full_name: input.full_name.clone(),
            email: account.email.clone(),
            created_at: now,
        });
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        self.check(StoreOp::FindAccount)?;
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn create_session(&self, input: &CreateSession) -> StoreResult<UserSession> {
        let mut tables = self.tables.write().await;

        if tables
            .sessions
            .iter()
            .any(|s| s.refresh_token_hash == input.refresh_token_hash)
        {
            return Err(StoreError::UniqueViolation {
                constraint: constraints::SESSIONS_REFRESH_TOKEN.into(),
            });
        }

        let now = Utc::now();
        let session = UserSession {
            id: tables.next_id(),
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            user_agent: input.user_agent.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<UserSession>> {
        self.check(StoreOp::FindSession)?;
        let now = Utc::now();
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.id == id && s.is_active_at(now))
            .cloned())
    }

    async fn find_session_by_refresh_token_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<UserSession>> {
        self.check(StoreOp::FindSession)?;
        let now = Utc::now();
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.refresh_token_hash == hash && s.is_active_at(now))
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .sessions
            .iter_mut()
            .find(|s| s.id == id && !s.is_revoked)
        {
            Some(session) => {
                session.is_revoked = true;
                session.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let mut revoked = 0;
        for session in tables
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && !s.is_revoked)
        {
            session.is_revoked = true;
            session.updated_at = now;
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn cleanup_expired_sessions(&self) -> StoreResult<u64> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.is_active_at(now));
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn find_profile(&self, user_id: DbId) -> StoreResult<Option<Profile>> {
        self.count_data_read(StoreOp::FindProfile)?;
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        self.count_data_read(StoreOp::ListCourses)?;
        let mut courses = self.tables.read().await.courses.clone();
        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(courses)
    }

    async fn find_course_by_slug(&self, slug: &str) -> StoreResult<Option<Course>> {
        self.count_data_read(StoreOp::FindCourse)?;
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create_enrollment(&self, input: &CreateEnrollment) -> StoreResult<Enrollment> {
        self.count_data_read(StoreOp::CreateEnrollment)?;
        let mut tables = self.tables.write().await;
        insert_enrollment(&mut tables, input, Utc::now())
    }

    async fn list_enrollments_for_user(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<EnrollmentWithCourse>> {
        self.count_data_read(StoreOp::ListEnrollments)?;
        let tables = self.tables.read().await;

        let mut rows: Vec<EnrollmentWithCourse> = tables
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter_map(|e| {
                let course = tables.courses.iter().find(|c| c.id == e.course_id)?;
                Some(EnrollmentWithCourse {
                    enrollment: e.clone(),
                    course: course.clone(),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.enrollment
                .enrolled_at
                .cmp(&a.enrollment.enrolled_at)
                .then(b.enrollment.id.cmp(&a.enrollment.id))
        });
        Ok(rows)
    }
}
