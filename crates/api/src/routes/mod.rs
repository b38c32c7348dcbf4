pub mod auth;
pub mod courses;
pub mod health;
pub mod session;

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, profile};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-in                  sign in (public)
/// /auth/sign-up                  sign up (public)
/// /auth/refresh                  rotate refresh token (public)
/// /auth/sign-out                 sign out
///
/// /session                       current identity
/// /session/events                SSE session transitions
///
/// /profile                       profile of the caller
///
/// /courses                       catalog
/// /courses/{slug}                course detail
/// /courses/{slug}/enroll         enroll (POST)
///
/// /dashboard                     profile + enrollments
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/session", session::router())
        .nest("/courses", courses::router())
        .route("/profile", get(profile::get_profile))
        .route("/dashboard", get(dashboard::get_dashboard))
}
