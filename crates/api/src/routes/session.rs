use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/session`.
///
/// ```text
/// GET    /            current identity
/// GET    /events      SSE stream of session transitions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::current))
        .route("/events", get(session::events))
}
