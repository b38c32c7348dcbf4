//! Handlers for the `/session` resource.
//!
//! `GET /session` exposes the identity resolved by the session guard.
//! `GET /session/events` streams the caller's session transitions as
//! server-sent events.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};
use portal_core::navigation;
use portal_core::types::DbId;
use serde::Serialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::auth::events::SessionEvent;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Interval between SSE keep-alive comments.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// The signed-in identity.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: DbId,
    pub email: String,
    pub session_id: DbId,
}

/// One SSE `data:` payload.
#[derive(Debug, Serialize)]
pub struct SessionEventPayload {
    #[serde(flatten)]
    pub event: SessionEvent,
    /// Set when the event ended the listening session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl SessionEventPayload {
    /// Wrap `event` as seen by the holder of `session_id`.
    pub fn for_session(event: SessionEvent, session_id: DbId) -> Self {
        let redirect = event
            .ends_session(session_id)
            .then_some(navigation::CREDENTIAL_ENTRY);
        Self { event, redirect }
    }
}

/// GET /api/v1/session
pub async fn current(auth: AuthUser) -> AppResult<Json<DataResponse<SessionInfo>>> {
    Ok(Json(DataResponse {
        data: SessionInfo {
            user_id: auth.user_id,
            email: auth.email,
            session_id: auth.session_id,
        },
    }))
}

/// GET /api/v1/session/events
///
/// Events of other users are filtered out. A lagging subscriber skips the
/// events it missed rather than failing the stream.
pub async fn events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = auth.user_id;
    let session_id = auth.session_id;
    tracing::debug!(user_id, session_id, "Session event stream opened");

    let stream = BroadcastStream::new(state.session_events.subscribe()).filter_map(
        move |received| async move {
            let event = match received {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "Session event stream lagged");
                    return None;
                }
            };
            if event.user_id() != user_id {
                return None;
            }

            let name = event.name();
            let payload = SessionEventPayload::for_session(event, session_id);
            match Event::default().event(name).json_data(&payload) {
                Ok(sse) => Some(Ok(sse)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode session event");
                    None
                }
            }
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}
