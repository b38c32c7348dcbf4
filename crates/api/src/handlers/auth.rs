//! Handlers for the `/auth` resource (sign-in, sign-up, refresh, sign-out).

use axum::extract::{Query, State};
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use portal_core::error::CoreError;
use portal_core::navigation;
use portal_core::notice::{self, Notice};
use portal_core::types::DbId;
use portal_core::validation::{normalize_email, validate_input, SignInInput, SignUpInput};
use portal_db::models::account::CreateAccount;
use portal_db::models::session::CreateSession;
use portal_db::store::constraints;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::events::SessionEvent;
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ViewResponse;
use crate::state::AppState;

/// Message returned for any unknown email / wrong password combination.
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
/// Message returned when signing up with an email that already has an account.
pub const ALREADY_REGISTERED: &str = "User already registered";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// How many sessions `POST /auth/sign-out` ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignOutScope {
    /// Every session of the user.
    #[default]
    Global,
    /// Only the session making the request.
    Local,
}

/// Query parameters for `POST /auth/sign-out`.
#[derive(Debug, Default, Deserialize)]
pub struct SignOutParams {
    #[serde(default)]
    pub scope: SignOutScope,
}

/// Issued session returned by sign-in, sign-up and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Public identity embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub email: String,
}

/// Payload of a successful sign-out.
#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub revoked_sessions: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-in
///
/// Authenticate with email + password. On success the session is returned in
/// the body and set as the `portal_session` cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(mut input): ApiJson<SignInInput>,
) -> AppResult<Response> {
    input.email = normalize_email(&input.email);
    validate_input(&input)?;

    let account = state.store.find_account_by_email(&input.email).await?;

    let Some(account) = account else {
        verify_against_dummy(&input.password);
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = account.id, "Sign-in rejected: wrong password");
        return Err(invalid_credentials());
    }

    let (auth, session_id) =
        issue_session(&state, account.id, &account.email, user_agent(&headers)).await?;
    state.session_events.publish(SessionEvent::SignedIn {
        user_id: account.id,
        session_id,
    });
    tracing::info!(user_id = account.id, session_id, "User signed in");

    respond_with_session(
        &state,
        StatusCode::OK,
        auth,
        Notice::success(notice::WELCOME_BACK),
    )
}

/// POST /api/v1/auth/sign-up
///
/// Create an account (and its profile) and sign the new user in.
pub async fn sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(mut input): ApiJson<SignUpInput>,
) -> AppResult<Response> {
    input.email = normalize_email(&input.email);
    validate_input(&input)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let full_name = input
        .full_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let account = state
        .store
        .create_account(&CreateAccount {
            email: input.email,
            password_hash,
            full_name,
        })
        .await
        .map_err(|e| {
            if e.violates(constraints::ACCOUNTS_EMAIL) {
                AppError::Core(CoreError::Conflict(ALREADY_REGISTERED.into()))
            } else {
                AppError::Store(e)
            }
        })?;

    let (auth, session_id) =
        issue_session(&state, account.id, &account.email, user_agent(&headers)).await?;
    state.session_events.publish(SessionEvent::SignedIn {
        user_id: account.id,
        session_id,
    });
    tracing::info!(user_id = account.id, session_id, "Account created");

    respond_with_session(
        &state,
        StatusCode::CREATED,
        auth,
        Notice::success(notice::ACCOUNT_CREATED),
    )
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new session (token rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<RefreshRequest>,
) -> AppResult<Response> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = state
        .store
        .find_session_by_refresh_token_hash(&token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Resolve the identity first so a failed lookup leaves the session intact.
    let profile = state.store.find_profile(session.user_id).await?;
    let email = profile
        .map(|p| p.email)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    // Only one caller can win the rotation of a given refresh token.
    if !state.store.revoke_session(session.id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    let (auth, session_id) =
        issue_session(&state, session.user_id, &email, user_agent(&headers)).await?;
    state.session_events.publish(SessionEvent::TokenRefreshed {
        user_id: session.user_id,
        session_id,
    });

    let body = ViewResponse::new(auth);
    let cookie = session_cookie(
        &body.data.access_token,
        state.config.jwt.access_token_expiry_secs(),
        state.config.cookie_secure,
    )
    .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// POST /api/v1/auth/sign-out
///
/// Revoke the caller's sessions (all of them unless `?scope=local`) and clear
/// the session cookie.
pub async fn sign_out(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<SignOutParams>,
) -> AppResult<Response> {
    let (revoked, session_id) = match params.scope {
        SignOutScope::Global => (
            state
                .store
                .revoke_all_sessions_for_user(auth_user.user_id)
                .await?,
            None,
        ),
        SignOutScope::Local => (
            u64::from(state.store.revoke_session(auth_user.session_id).await?),
            Some(auth_user.session_id),
        ),
    };

    state.session_events.publish(SessionEvent::SignedOut {
        user_id: auth_user.user_id,
        session_id,
    });
    tracing::info!(user_id = auth_user.user_id, revoked, scope = ?params.scope, "User signed out");

    let body = ViewResponse::new(SignOutResponse {
        revoked_sessions: revoked,
    })
    .with_notice(Notice::success(notice::SIGNED_OUT))
    .redirect_to(navigation::CREDENTIAL_ENTRY);

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
        Json(body),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Persist a session row and mint its tokens.
async fn issue_session(
    state: &AppState,
    user_id: DbId,
    email: &str,
    user_agent: Option<String>,
) -> AppResult<(AuthResponse, DbId)> {
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session = state
        .store
        .create_session(&CreateSession {
            user_id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent,
        })
        .await?;

    let access_token = generate_access_token(user_id, session.id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let auth = AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        token_type: "bearer",
        expires_in: state.config.jwt.access_token_expiry_secs(),
        user: SessionUser {
            id: user_id,
            email: email.to_string(),
        },
    };
    Ok((auth, session.id))
}

/// Build the sign-in / sign-up response: body, notice, catalog redirect and
/// session cookie.
fn respond_with_session(
    state: &AppState,
    status: StatusCode,
    auth: AuthResponse,
    notice: Notice,
) -> AppResult<Response> {
    let cookie = session_cookie(
        &auth.access_token,
        state.config.jwt.access_token_expiry_secs(),
        state.config.cookie_secure,
    )
    .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    let body = ViewResponse::new(auth)
        .with_notice(notice)
        .redirect_to(navigation::CATALOG);

    Ok((status, [(SET_COOKIE, cookie)], Json(body)).into_response())
}
