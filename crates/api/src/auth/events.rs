//! In-process broadcast of session state transitions.
//!
//! Sign-in, refresh and sign-out publish a [`SessionEvent`]; the
//! `/session/events` stream forwards each user's events so an open view can
//! leave for the credential-entry view when its session ends elsewhere.

use portal_core::types::DbId;
use serde::Serialize;
use tokio::sync::broadcast;

/// A change in a user's session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    SignedIn { user_id: DbId, session_id: DbId },
    TokenRefreshed { user_id: DbId, session_id: DbId },
    /// `session_id` is `None` when every session of the user was revoked.
    SignedOut {
        user_id: DbId,
        session_id: Option<DbId>,
    },
}

impl SessionEvent {
    pub fn user_id(&self) -> DbId {
        match self {
            SessionEvent::SignedIn { user_id, .. }
            | SessionEvent::TokenRefreshed { user_id, .. }
            | SessionEvent::SignedOut { user_id, .. } => *user_id,
        }
    }

    /// Short event name, used as the SSE `event:` field.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn { .. } => "signed_in",
            SessionEvent::TokenRefreshed { .. } => "token_refreshed",
            SessionEvent::SignedOut { .. } => "signed_out",
        }
    }

    /// Whether this event leaves `session_id` without a session.
    pub fn ends_session(&self, session_id: DbId) -> bool {
        match self {
            SessionEvent::SignedOut {
                session_id: None, ..
            } => true,
            SessionEvent::SignedOut {
                session_id: Some(id),
                ..
            } => *id == session_id,
            _ => false,
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out hub for [`SessionEvent`]s, shared via `Arc`.
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a hub with a specific channel capacity.
    ///
    /// Slow receivers observe `RecvError::Lagged` once the buffer is full.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SessionEvent) {
        tracing::debug!(event = event.name(), user_id = event.user_id(), "Session event");
        // A send error only means nobody is listening.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
