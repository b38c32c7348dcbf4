use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /sign-in     sign_in (public)
/// POST   /sign-up     sign_up (public)
/// POST   /refresh     refresh (public)
/// POST   /sign-out    sign_out (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/refresh", post(auth::refresh))
        .route("/sign-out", post(auth::sign_out))
}
