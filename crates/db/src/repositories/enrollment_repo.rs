//! Repository for the `enrollments` table.

use portal_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{
    CreateEnrollment, Enrollment, EnrollmentCourseRow, EnrollmentWithCourse,
};

const COLUMNS: &str = "id, user_id, course_id, enrolled_at";

/// Enrollment inserts and per-user reads.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert an enrollment.
    ///
    /// A second enrollment for the same (user, course) pair fails with a
    /// `uq_enrollments_user_course` unique violation; nothing is written.
    pub async fn create(pool: &PgPool, input: &CreateEnrollment) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .fetch_one(pool)
            .await
    }

    /// List a user's enrollments joined with their courses, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrollmentWithCourse>, sqlx::Error> {
        let rows = sqlx::query_as::<_, EnrollmentCourseRow>(
            "SELECT e.id, e.user_id, e.course_id, e.enrolled_at,
                    c.name AS course_name, c.slug AS course_slug,
                    c.description AS course_description, c.icon AS course_icon,
                    c.color AS course_color, c.created_at AS course_created_at
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC, e.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(EnrollmentWithCourse::from).collect())
    }
}
