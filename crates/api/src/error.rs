use axum::extract::rejection::JsonRejection;
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use portal_core::error::CoreError;
use portal_core::navigation;
use portal_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for store
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `portal_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error that no handler turned into something more specific.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message (not shown to users).
    #[error("Internal error: {0}")]
    InternalError(String),

    /// An action failed; `message` is the fixed text shown to the user.
    /// The cause is logged where the error is raised.
    #[error("{code}: {message}")]
    Operation {
        code: &'static str,
        message: &'static str,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, redirect) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                    not_found_redirect(entity),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Unauthenticated => (
                    StatusCode::SEE_OTHER,
                    "UNAUTHENTICATED",
                    "Authentication required".to_string(),
                    Some(navigation::CREDENTIAL_ENTRY),
                ),
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_error()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
            AppError::Operation { code, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                *code,
                (*message).to_string(),
                None,
            ),
        };

        let body = match redirect {
            Some(target) => json!({ "error": message, "code": code, "redirect": target }),
            None => json!({ "error": message, "code": code }),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if status.is_redirection() {
            if let Some(target) = redirect {
                response
                    .headers_mut()
                    .insert(LOCATION, HeaderValue::from_static(target));
            }
        }
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        AppError::BadRequest(rejection.body_text())
    }
}

/// Where a client should go after a lookup for `entity` came back empty.
fn not_found_redirect(entity: &str) -> Option<&'static str> {
    match entity {
        "Course" => Some(navigation::CATALOG),
        _ => None,
    }
}

fn internal_error() -> (StatusCode, &'static str, String, Option<&'static str>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
        None,
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique violations map to 409 naming the constraint.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String, Option<&'static str>) {
    match err {
        StoreError::UniqueViolation { constraint } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
            None,
        ),
        other => {
            tracing::error!(error = %other, kind = other.kind(), "Store error");
            internal_error()
        }
    }
}
