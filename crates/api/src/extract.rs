//! Request body extractors that answer with the application error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (missing content type, malformed JSON,
/// missing fields) become [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
