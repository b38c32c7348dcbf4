//! Dashboard Aggregator.
//!
//! The profile and the enrollment list are fetched concurrently and fill
//! independent parts of the view. A failure in one leaves the other intact
//! and adds an error notice.

use axum::extract::State;
use axum::Json;
use portal_core::avatar::Avatar;
use portal_core::navigation;
use portal_core::notice::{self, Notice};
use portal_core::types::{DbId, Timestamp};
use portal_db::models::enrollment::EnrollmentWithCourse;
use portal_db::models::profile::Profile;
use serde::Serialize;

use crate::handlers::catalog::CourseCard;
use crate::middleware::auth::AuthUser;
use crate::response::ViewResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The profile part of the dashboard.
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub full_name: Option<String>,
    pub email: String,
    /// Absent when the profile could not be loaded.
    pub member_since: Option<Timestamp>,
    pub avatar: Avatar,
}

impl From<Profile> for ProfileSummary {
    fn from(profile: Profile) -> Self {
        let avatar = Avatar::from_full_name(profile.full_name.as_deref());
        Self {
            full_name: profile.full_name,
            email: profile.email,
            member_since: Some(profile.created_at),
            avatar,
        }
    }
}

impl ProfileSummary {
    /// What can be shown from the session alone.
    fn from_session(email: &str) -> Self {
        Self {
            full_name: None,
            email: email.to_string(),
            member_since: None,
            avatar: Avatar::PersonIcon,
        }
    }
}

/// An enrolled course card.
#[derive(Debug, Serialize)]
pub struct EnrolledCourseCard {
    pub enrollment_id: DbId,
    pub enrolled_at: Timestamp,
    #[serde(flatten)]
    pub course: CourseCard,
}

impl From<&EnrollmentWithCourse> for EnrolledCourseCard {
    fn from(row: &EnrollmentWithCourse) -> Self {
        Self {
            enrollment_id: row.enrollment.id,
            enrolled_at: row.enrollment.enrolled_at,
            course: CourseCard::from(&row.course),
        }
    }
}

/// Prompt shown when the user has no enrollments yet.
#[derive(Debug, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub href: &'static str,
}

const BROWSE_COURSES: CallToAction = CallToAction {
    label: "Browse Courses",
    href: navigation::CATALOG,
};

/// The aggregated dashboard view.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub profile: ProfileSummary,
    pub enrollments: Vec<EnrolledCourseCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ViewResponse<DashboardView>> {
    let (profile, enrollments) = tokio::join!(
        state.store.find_profile(auth.user_id),
        state.store.list_enrollments_for_user(auth.user_id),
    );

    let mut view_notice = None;

    let profile = match profile {
        Ok(Some(profile)) => ProfileSummary::from(profile),
        Ok(None) => {
            tracing::warn!(user_id = auth.user_id, "No profile row for signed-in user");
            view_notice = Some(Notice::error(notice::PROFILE_LOAD_FAILED));
            ProfileSummary::from_session(&auth.email)
        }
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, kind = e.kind(), "Failed to load profile");
            view_notice = Some(Notice::error(notice::PROFILE_LOAD_FAILED));
            ProfileSummary::from_session(&auth.email)
        }
    };

    // The enrollment failure is the one the view surfaces if both fail.
    let enrollments: Vec<EnrolledCourseCard> = match enrollments {
        Ok(rows) => rows.iter().map(EnrolledCourseCard::from).collect(),
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, kind = e.kind(), "Failed to load enrollments");
            view_notice = Some(Notice::error(notice::DASHBOARD_LOAD_FAILED));
            Vec::new()
        }
    };

    let call_to_action = enrollments.is_empty().then_some(BROWSE_COURSES);

    Json(
        ViewResponse::new(DashboardView {
            profile,
            enrollments,
            call_to_action,
        })
        .with_optional_notice(view_notice),
    )
}
