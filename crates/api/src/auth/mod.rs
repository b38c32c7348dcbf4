//! Credential sessions: the part of the backend collaborator that issues,
//! verifies and invalidates sessions.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access-token generation/validation and refresh-token helpers.
//! - [`cookie`] -- the `portal_session` cookie carrying the access token.
//! - [`events`] -- broadcast of session state transitions.

pub mod cookie;
pub mod events;
pub mod jwt;
pub mod password;
