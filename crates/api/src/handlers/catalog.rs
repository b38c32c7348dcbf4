//! Course Catalog: every course as a card, in creation order, plus the
//! avatar shown in the catalog header.

use axum::extract::State;
use axum::Json;
use portal_core::avatar::Avatar;
use portal_core::icons::{resolve_gradient, CourseIcon};
use portal_core::navigation;
use portal_core::notice::{self, Notice};
use portal_core::types::DbId;
use portal_db::models::course::Course;
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::response::ViewResponse;
use crate::state::AppState;

/// A course with its icon and gradient resolved for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CourseCard {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: CourseIcon,
    pub color: String,
    /// Client path of the course detail view.
    pub href: String,
}

impl From<&Course> for CourseCard {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            slug: course.slug.clone(),
            description: course.description.clone(),
            icon: CourseIcon::resolve(course.icon.as_deref()),
            color: resolve_gradient(course.color.as_deref()).to_string(),
            href: navigation::course_detail(&course.slug),
        }
    }
}

/// The catalog view.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub courses: Vec<CourseCard>,
    /// Header avatar of the signed-in user. Falls back to the person icon
    /// when the profile cannot be loaded.
    pub avatar: Avatar,
}

/// GET /api/v1/courses
///
/// A failed course fetch still renders the catalog view: the list is empty
/// and an error notice explains why. A failed profile fetch only costs the
/// avatar its initials.
pub async fn list_courses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ViewResponse<CatalogView>> {
    let (courses, profile) = tokio::join!(
        state.store.list_courses(),
        state.store.find_profile(auth.user_id),
    );

    let avatar = match profile {
        Ok(profile) => {
            Avatar::from_full_name(profile.as_ref().and_then(|p| p.full_name.as_deref()))
        }
        Err(e) => {
            tracing::warn!(
                user_id = auth.user_id,
                error = %e,
                kind = e.kind(),
                "Failed to load profile for catalog avatar"
            );
            Avatar::PersonIcon
        }
    };

    match courses {
        Ok(courses) => {
            tracing::debug!(user_id = auth.user_id, count = courses.len(), "Listed courses");
            Json(ViewResponse::new(CatalogView {
                courses: courses.iter().map(CourseCard::from).collect(),
                avatar,
            }))
        }
        Err(e) => {
            tracing::error!(user_id = auth.user_id, error = %e, kind = e.kind(), "Failed to list courses");
            Json(
                ViewResponse::new(CatalogView {
                    courses: Vec::new(),
                    avatar,
                })
                .with_notice(Notice::error(notice::COURSES_LOAD_FAILED)),
            )
        }
    }
}
