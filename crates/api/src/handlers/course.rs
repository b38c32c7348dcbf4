//! Course Detail & Enrollment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use portal_core::error::CoreError;
use portal_core::notice::{self, Notice};
use portal_core::resources::{resources_for, Resource};
use portal_core::types::{DbId, Timestamp};
use portal_db::models::course::Course;
use portal_db::models::enrollment::CreateEnrollment;
use portal_db::store::constraints;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::catalog::CourseCard;
use crate::middleware::auth::AuthUser;
use crate::response::ViewResponse;
use crate::state::AppState;

/// Error code returned when an enrollment insert fails.
pub const ENROLL_FAILED_CODE: &str = "ENROLL_FAILED";

/// A course card plus its curated resources.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseCard,
    pub resources: &'static [Resource],
}

/// Outcome of an enroll action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollStatus {
    Enrolled,
    AlreadyEnrolled,
}

/// Payload of `POST /courses/{slug}/enroll`.
#[derive(Debug, Serialize)]
pub struct EnrollResult {
    pub status: EnrollStatus,
    pub course_id: DbId,
    /// Set only when a new enrollment row was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<Timestamp>,
}

/// Look up a course by slug. A lookup failure is reported the same way as a
/// missing course.
async fn resolve_course(state: &AppState, slug: &str) -> AppResult<Course> {
    match state.store.find_course_by_slug(slug).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(CoreError::not_found("Course", slug).into()),
        Err(e) => {
            tracing::error!(slug, error = %e, kind = e.kind(), "Course lookup failed");
            Err(CoreError::not_found("Course", slug).into())
        }
    }
}

/// GET /api/v1/courses/{slug}
pub async fn get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<ViewResponse<CourseDetail>>> {
    let course = resolve_course(&state, &slug).await?;

    Ok(Json(ViewResponse::new(CourseDetail {
        course: CourseCard::from(&course),
        resources: resources_for(&course.slug),
    })))
}

/// POST /api/v1/courses/{slug}/enroll
///
/// Issues exactly one insert. The `(user, course)` uniqueness constraint is
/// what detects a repeat enrollment; any other failure is reported with a
/// fixed message and never retried.
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<ViewResponse<EnrollResult>>)> {
    let course = resolve_course(&state, &slug).await?;

    let input = CreateEnrollment {
        user_id: auth.user_id,
        course_id: course.id,
    };

    match state.store.create_enrollment(&input).await {
        Ok(enrollment) => {
            tracing::info!(
                user_id = auth.user_id,
                course_id = course.id,
                enrollment_id = enrollment.id,
                "Enrolled in course"
            );
            let body = ViewResponse::new(EnrollResult {
                status: EnrollStatus::Enrolled,
                course_id: course.id,
                enrollment_id: Some(enrollment.id),
                enrolled_at: Some(enrollment.enrolled_at),
            })
            .with_notice(Notice::enrolled(&course.name));
            Ok((StatusCode::CREATED, Json(body)))
        }
        Err(e) if e.violates(constraints::ENROLLMENTS_USER_COURSE) => {
            tracing::debug!(user_id = auth.user_id, course_id = course.id, "Already enrolled");
            let body = ViewResponse::new(EnrollResult {
                status: EnrollStatus::AlreadyEnrolled,
                course_id: course.id,
                enrollment_id: None,
                enrolled_at: None,
            })
            .with_notice(Notice::info(notice::ALREADY_ENROLLED));
            Ok((StatusCode::OK, Json(body)))
        }
        Err(e) => {
            tracing::error!(
                user_id = auth.user_id,
                course_id = course.id,
                error = %e,
                kind = e.kind(),
                "Enrollment insert failed"
            );
            Err(AppError::Operation {
                code: ENROLL_FAILED_CODE,
                message: notice::ENROLL_FAILED,
            })
        }
    }
}
