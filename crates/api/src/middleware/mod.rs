//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- the session guard; resolves the caller's session
//!   or redirects to the credential-entry view.

pub mod auth;
