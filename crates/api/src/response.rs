//! Shared response envelope types for API handlers.
//!
//! Plain reads use `{ "data": ... }`. Views and actions that also carry a
//! user notice or a navigation target use [`ViewResponse`], whose optional
//! fields are omitted when empty.

use portal_core::notice::Notice;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "notice"?: Notice, "redirect"?: path }` envelope.
#[derive(Debug, Serialize)]
pub struct ViewResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T: Serialize> ViewResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            notice: None,
            redirect: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Attach a notice only if one is present.
    pub fn with_optional_notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}
