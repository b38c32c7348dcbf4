//! Session guard extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_core::error::CoreError;
use portal_core::types::DbId;

use crate::auth::cookie::access_token;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The resolved session of the caller.
///
/// Use this as an extractor parameter in any handler that needs a signed-in
/// user. Extraction runs before the handler body, so a request without a
/// usable session is answered with a redirect to the credential-entry view
/// and no data is fetched:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
    /// The `user_sessions` row backing the access token.
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthenticated = || AppError::Core(CoreError::Unauthenticated);

        let token = access_token(&parts.headers).ok_or_else(unauthenticated)?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthenticated()
        })?;

        // A revoked or expired session row invalidates the token even while
        // the JWT itself is still within its lifetime.
        match state.store.find_active_session(claims.sid).await {
            Ok(Some(session)) if session.user_id == claims.sub => Ok(AuthUser {
                user_id: claims.sub,
                email: claims.email,
                session_id: session.id,
            }),
            Ok(_) => {
                tracing::debug!(session_id = claims.sid, "Session is no longer active");
                Err(unauthenticated())
            }
            Err(e) => {
                tracing::warn!(error = %e, session_id = claims.sid, "Session lookup failed");
                Err(unauthenticated())
            }
        }
    }
}
