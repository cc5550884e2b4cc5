//! Session actor message types.

use tokio::sync::oneshot;

use crate::game::{GameEvent, Snapshot};

/// Messages that can be sent to a [`SessionActor`](super::SessionActor)
#[derive(Debug)]
pub enum SessionMessage {
    /// Event from the presentation layer
    Dispatch(GameEvent),

    /// Get the current snapshot
    GetSnapshot {
        response: oneshot::Sender<Snapshot>,
    },

    /// Stop the actor. In-flight requests are abandoned.
    Close,
}

/// Errors returned by [`SessionHandle`](super::SessionHandle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,
}
