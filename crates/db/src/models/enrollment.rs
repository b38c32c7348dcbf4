//! Enrollment model, its insert DTO, and the course-joined read model.

use portal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::course::Course;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub enrolled_at: Timestamp,
}

/// DTO for creating an enrollment.
#[derive(Debug, Clone, Copy)]
pub struct CreateEnrollment {
    pub user_id: DbId,
    pub course_id: DbId,
}

/// An enrollment joined with the course it refers to.
#[derive(Debug, Clone)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// Flat row shape produced by the enrollments/courses join.
#[derive(Debug, FromRow)]
pub(crate) struct EnrollmentCourseRow {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub enrolled_at: Timestamp,
    pub course_name: String,
    pub course_slug: String,
    pub course_description: Option<String>,
    pub course_icon: Option<String>,
    pub course_color: Option<String>,
    pub course_created_at: Timestamp,
}

impl From<EnrollmentCourseRow> for EnrollmentWithCourse {
    fn from(row: EnrollmentCourseRow) -> Self {
        Self {
            enrollment: Enrollment {
                id: row.id,
                user_id: row.user_id,
                course_id: row.course_id,
                enrolled_at: row.enrolled_at,
            },
            course: Course {
                id: row.course_id,
                name: row.course_name,
                slug: row.course_slug,
                description: row.course_description,
                icon: row.course_icon,
                color: row.course_color,
                created_at: row.course_created_at,
            },
        }
    }
}
