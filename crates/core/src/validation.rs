//! Credential validation rules for sign-in and sign-up.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_LENGTH: u64 = 6;

/// Credentials submitted on the sign-in form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(email(message = "Unable to validate email address: invalid format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Details submitted on the sign-up form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpInput {
    #[validate(email(message = "Unable to validate email address: invalid format"))]
    pub email: String,
    #[validate(length(
        min = PASSWORD_MIN_LENGTH,
        message = "Password should be at least 6 characters"
    ))]
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Lowercase and trim an email so lookups and the uniqueness constraint
/// agree on one spelling.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Run a [`Validate`] impl and collapse any failure into a single
/// [`CoreError::Validation`] carrying the first message, by field name.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}
