//! HTTP handlers, one module per resource.
//!
//! Every handler except the `auth` entry points takes an
//! [`AuthUser`](crate::middleware::auth::AuthUser), so the session guard runs
//! before any data is fetched.

pub mod auth;
pub mod catalog;
pub mod course;
pub mod dashboard;
pub mod profile;
pub mod session;
