use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, course};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                  catalog
/// GET    /{slug}            course detail + resources
/// POST   /{slug}/enroll     enroll the caller
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_courses))
        .route("/{slug}", get(course::get_course))
        .route("/{slug}/enroll", post(course::enroll))
}
