use std::sync::Arc;

use portal_db::store::PortalStore;

use crate::auth::events::SessionEvents;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The backend store (PostgreSQL or in-memory).
    pub store: Arc<dyn PortalStore>,
    /// Server configuration (JWT settings, cookie flags).
    pub config: Arc<ServerConfig>,
    /// Session state transitions, fanned out to `/session/events` streams.
    pub session_events: Arc<SessionEvents>,
}
