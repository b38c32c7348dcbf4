//! Transient user-facing notices (toasts) attached to responses.

use serde::{Deserialize, Serialize};

pub const WELCOME_BACK: &str = "Welcome back!";
pub const ACCOUNT_CREATED: &str = "Account created!";
pub const SIGNED_OUT: &str = "Signed out successfully";
pub const ALREADY_ENROLLED: &str = "You are already enrolled in this course";
pub const ENROLL_FAILED: &str = "Failed to enroll. Please try again.";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const COURSES_LOAD_FAILED: &str = "Failed to load courses";
pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load your dashboard";
pub const PROFILE_LOAD_FAILED: &str = "Failed to load your profile";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Confirmation shown after a successful enrollment.
    pub fn enrolled(course_name: &str) -> Self {
        Self::success(format!("Successfully enrolled in {course_name}!"))
    }
}
